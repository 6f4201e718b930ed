//! Discovery loop - scroll the results list until enough listings are loaded.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::SurfaceResult;
use crate::traits::surface::RenderSurface;
use crate::types::config::{DiscoveryTarget, ScraperConfig};

/// Why the discovery loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Termination {
    /// At least `total` listings were visible
    GoalReached,

    /// A scroll produced no new listings
    Exhausted,

    /// The configured round cap was hit while the list was still growing
    RoundLimit,
}

/// Parameters for a discovery run.
#[derive(Debug, Clone)]
pub struct DiscoverConfig {
    /// Selector matching one element per listing
    pub listing_query: String,

    /// How many listings to collect
    pub target: DiscoveryTarget,

    /// Pause after each scroll
    pub settle: Duration,

    /// Optional cap on scroll rounds
    pub max_rounds: Option<usize>,
}

impl DiscoverConfig {
    /// Create a config for a listing selector with an unbounded target.
    pub fn new(listing_query: impl Into<String>) -> Self {
        Self {
            listing_query: listing_query.into(),
            target: DiscoveryTarget::Unbounded,
            settle: Duration::ZERO,
            max_rounds: None,
        }
    }

    /// Derive the discovery parameters from a run config.
    pub fn from_scraper_config(config: &ScraperConfig) -> Self {
        Self {
            listing_query: config.selectors.listing.clone(),
            target: config.target,
            settle: config.delays.scroll_settle,
            max_rounds: config.max_scroll_rounds,
        }
    }

    /// Set the target.
    pub fn with_target(mut self, target: DiscoveryTarget) -> Self {
        self.target = target;
        self
    }

    /// Set the settle delay.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Cap the number of rounds.
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = Some(rounds);
        self
    }
}

/// Listings found by a discovery run.
#[derive(Debug)]
pub struct Discovery<I> {
    /// Handles in discovery order
    pub items: Vec<I>,

    /// Why the loop stopped
    pub termination: Termination,

    /// Number of scroll rounds performed
    pub rounds: usize,
}

/// Scroll the surface until the target is met or the list stops growing.
///
/// There is no round cap unless `max_rounds` is set, so an unbounded target
/// relies on the surface eventually running out of results.
pub async fn discover<S: RenderSurface>(
    surface: &S,
    config: &DiscoverConfig,
) -> SurfaceResult<Discovery<S::Item>> {
    let mut previously_counted = 0;
    let mut rounds = 0;

    loop {
        surface.reveal_more().await?;
        tokio::time::sleep(config.settle).await;
        rounds += 1;

        let count = surface.count(&config.listing_query).await?;

        if config.target.is_reached(count) {
            let mut items = surface.query_all(&config.listing_query).await?;
            items.truncate(config.target.limit().unwrap_or(count));
            info!("Total Scraped: {}", items.len());
            return Ok(Discovery {
                items,
                termination: Termination::GoalReached,
                rounds,
            });
        }

        if count == previously_counted {
            let items = surface.query_all(&config.listing_query).await?;
            info!("Arrived at all available. Total Scraped: {}", items.len());
            return Ok(Discovery {
                items,
                termination: Termination::Exhausted,
                rounds,
            });
        }

        if config.max_rounds.is_some_and(|max| rounds >= max) {
            let items = surface.query_all(&config.listing_query).await?;
            warn!(
                "Stopped after {} scroll rounds with the list still growing. Total Scraped: {}",
                rounds,
                items.len()
            );
            return Ok(Discovery {
                items,
                termination: Termination::RoundLimit,
                rounds,
            });
        }

        debug!("Round {} grew list from {} to {}", rounds, previously_counted, count);
        previously_counted = count;
        info!("Currently Scraped: {}", count);
    }
}
