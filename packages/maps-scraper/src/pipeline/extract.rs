//! Field extraction - turn one listing into one [`Record`].
//!
//! Failures are isolated per listing: a listing that errors is skipped and
//! reported, and the rest of the batch carries on.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::SurfaceResult;
use crate::traits::surface::RenderSurface;
use crate::types::config::{ScraperConfig, Selectors};
use crate::types::record::{Record, RecordBatch};

/// Parameters for extracting listings.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Where to find each field
    pub selectors: Selectors,

    /// Pause after activating a listing
    pub settle: Duration,
}

impl ExtractConfig {
    pub fn new(selectors: Selectors) -> Self {
        Self {
            selectors,
            settle: Duration::ZERO,
        }
    }

    /// Derive extraction parameters from a run config.
    pub fn from_scraper_config(config: &ScraperConfig) -> Self {
        Self {
            selectors: config.selectors.clone(),
            settle: config.delays.activate_settle,
        }
    }

    /// Set the activation settle delay.
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

/// A listing that could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    /// Position of the listing in discovery order
    pub index: usize,

    /// Rendered error
    pub message: String,
}

/// Result of extracting a whole set of listings.
#[derive(Debug)]
pub struct ExtractionOutcome {
    /// Successfully extracted records in discovery order
    pub batch: RecordBatch,

    /// Listings that were skipped
    pub failures: Vec<ItemFailure>,
}

impl ExtractionOutcome {
    /// True when no listing failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Extract a single listing.
///
/// Missing detail elements become empty fields; any surface error fails the
/// whole listing and no partial record is produced.
pub async fn extract_record<S: RenderSurface>(
    surface: &S,
    item: &S::Item,
    config: &ExtractConfig,
) -> SurfaceResult<Record> {
    surface.activate(item).await?;
    tokio::time::sleep(config.settle).await;

    let selectors = &config.selectors;
    let name = surface.first_text(&selectors.name).await?;
    let address = surface.first_text(&selectors.address).await?;

    // Connector details live on the listing card, not the detail pane
    let gun_types = surface.scoped_texts(item, &selectors.gun_type).await?;
    let power_ratings = surface.scoped_texts(item, &selectors.power).await?;

    let record = Record::from_parts(name, address, &gun_types, &power_ratings);
    if gun_types.len() != power_ratings.len() {
        debug!(
            "Listing {:?} has {} connector types but {} power ratings",
            record.name,
            gun_types.len(),
            power_ratings.len()
        );
    } else {
        debug!(
            "Listing {:?} chargers: {:?}",
            record.name,
            Record::pair_chargers(&gun_types, &power_ratings)
        );
    }

    Ok(record)
}

/// Extract every listing, collecting records into a batch saved at `save_at`.
pub async fn extract_all<S: RenderSurface>(
    surface: &S,
    items: &[S::Item],
    config: &ExtractConfig,
    save_at: impl Into<PathBuf>,
) -> ExtractionOutcome {
    let mut batch = RecordBatch::new(save_at);
    let mut failures = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match extract_record(surface, item, config).await {
            Ok(record) => batch.push(record),
            Err(e) => {
                warn!("Error occurred on listing {}: {}", index, e);
                failures.push(ItemFailure {
                    index,
                    message: e.to_string(),
                });
            }
        }
    }

    ExtractionOutcome { batch, failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockItem, MockListing, MockSurface};

    fn config() -> ExtractConfig {
        ExtractConfig::new(Selectors::default())
    }

    async fn revealed(listings: Vec<MockListing>) -> MockSurface {
        let surface = MockSurface::new().with_listings(listings);
        surface.reveal_more().await.unwrap();
        surface
    }

    #[tokio::test]
    async fn test_extract_full_listing() {
        let surface = revealed(vec![MockListing::new()
            .named("Fastned")
            .at("1 Main St")
            .with_charger(" CCS ", "50kW")
            .with_charger("CHAdeMO", " 50kW")])
        .await;

        let record = extract_record(&surface, &MockItem(0), &config()).await.unwrap();
        assert_eq!(record.name, "Fastned");
        assert_eq!(record.address, "1 Main St");
        assert_eq!(record.type_of_guns, "CCS, CHAdeMO");
        assert_eq!(record.power_in_kw, "50kW, 50kW");
    }

    #[tokio::test]
    async fn test_missing_elements_become_empty() {
        let surface = revealed(vec![MockListing::new()]).await;

        let record = extract_record(&surface, &MockItem(0), &config()).await.unwrap();
        assert_eq!(record, Record::default());
    }

    #[tokio::test]
    async fn test_failures_are_skipped_not_fatal() {
        let surface = revealed(vec![
            MockListing::new().named("A"),
            MockListing::new().named("B").failing_activation(),
            MockListing::new().named("C").failing_scoped_query(),
            MockListing::new().named("D"),
        ])
        .await;
        let items: Vec<_> = (0..4).map(MockItem).collect();

        let outcome = extract_all(&surface, &items, &config(), "unused").await;

        let names: Vec<_> = outcome.batch.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "D"]);
        assert_eq!(
            outcome.failures.iter().map(|f| f.index).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_unequal_connector_lists_are_kept() {
        let surface = revealed(vec![MockListing::new()
            .with_gun_type("A")
            .with_gun_type("B")
            .with_power("10kW")])
        .await;

        let record = extract_record(&surface, &MockItem(0), &config()).await.unwrap();
        assert_eq!(record.type_of_guns, "A, B");
        assert_eq!(record.power_in_kw, "10kW");
    }
}
