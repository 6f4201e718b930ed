//! Testing utilities including a scripted render surface.
//!
//! `MockSurface` behaves like a results page without a browser: listings
//! become visible a few at a time as the page is scrolled, and activating a
//! listing fills the detail pane that `first_text` reads from.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{SurfaceError, SurfaceResult};
use crate::traits::surface::RenderSurface;
use crate::types::config::Selectors;

/// One listing as the mock page presents it.
#[derive(Debug, Clone, Default)]
pub struct MockListing {
    name: Option<String>,
    address: Option<String>,
    gun_types: Vec<String>,
    power_ratings: Vec<String>,
    fail_activation: bool,
    fail_scoped: bool,
}

impl MockListing {
    /// A listing with no detail elements at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the detail-pane title.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the detail-pane address.
    pub fn at(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Add one connector type label.
    pub fn with_gun_type(mut self, label: impl Into<String>) -> Self {
        self.gun_types.push(label.into());
        self
    }

    /// Add one connector power label.
    pub fn with_power(mut self, label: impl Into<String>) -> Self {
        self.power_ratings.push(label.into());
        self
    }

    /// Add a matched type/power pair.
    pub fn with_charger(self, gun_type: impl Into<String>, power: impl Into<String>) -> Self {
        self.with_gun_type(gun_type).with_power(power)
    }

    /// Clicking this listing fails.
    pub fn failing_activation(mut self) -> Self {
        self.fail_activation = true;
        self
    }

    /// The listing's sub-elements vanish when queried.
    pub fn failing_scoped_query(mut self) -> Self {
        self.fail_scoped = true;
        self
    }
}

/// Handle to a mock listing (its position in discovery order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockItem(pub usize);

/// Record of a call made to the mock surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockSurfaceCall {
    Navigate { url: String },
    FillSearch { term: String },
    SubmitSearch,
    RevealMore,
    Activate { index: usize },
}

#[derive(Default)]
struct MockState {
    default_listings: Vec<MockListing>,
    term_listings: HashMap<String, Vec<MockListing>>,
    failing_terms: Vec<String>,
    fail_navigation: bool,
    current_term: Option<String>,
    visible: usize,
    active: Option<usize>,
    calls: Vec<MockSurfaceCall>,
}

impl MockState {
    fn listings(&self) -> &[MockListing] {
        self.current_term
            .as_ref()
            .and_then(|term| self.term_listings.get(term))
            .unwrap_or(&self.default_listings)
    }
}

/// A scripted [`RenderSurface`] for tests.
pub struct MockSurface {
    selectors: Selectors,
    reveal_step: usize,
    state: Arc<RwLock<MockState>>,
}

impl Default for MockSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockSurface {
    fn clone(&self) -> Self {
        Self {
            selectors: self.selectors.clone(),
            reveal_step: self.reveal_step,
            state: Arc::clone(&self.state),
        }
    }
}

impl MockSurface {
    /// Empty page; every scroll reveals all remaining listings.
    pub fn new() -> Self {
        Self {
            selectors: Selectors::default(),
            reveal_step: usize::MAX,
            state: Arc::new(RwLock::new(MockState::default())),
        }
    }

    /// Use custom selectors (must match the scraper's config).
    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Reveal at most `step` new listings per scroll.
    pub fn with_reveal_step(mut self, step: usize) -> Self {
        self.reveal_step = step.max(1);
        self
    }

    /// Listings shown for any search term without its own list.
    pub fn with_listings(self, listings: Vec<MockListing>) -> Self {
        self.state.write().unwrap().default_listings = listings;
        self
    }

    /// Listings shown for one specific search term.
    pub fn with_term_listings(self, term: impl Into<String>, listings: Vec<MockListing>) -> Self {
        self.state
            .write()
            .unwrap()
            .term_listings
            .insert(term.into(), listings);
        self
    }

    /// Typing this term into the search box fails.
    pub fn with_failing_term(self, term: impl Into<String>) -> Self {
        self.state.write().unwrap().failing_terms.push(term.into());
        self
    }

    /// Every navigation fails.
    pub fn with_navigation_failure(self) -> Self {
        self.state.write().unwrap().fail_navigation = true;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockSurfaceCall> {
        self.state.read().unwrap().calls.clone()
    }

    /// Number of scrolls performed so far.
    pub fn reveal_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, MockSurfaceCall::RevealMore))
            .count()
    }

    /// Number of listings currently visible.
    pub fn visible(&self) -> usize {
        self.state.read().unwrap().visible
    }
}

#[async_trait]
impl RenderSurface for MockSurface {
    type Item = MockItem;

    async fn navigate(&self, url: &str) -> SurfaceResult<()> {
        let mut state = self.state.write().unwrap();
        state.calls.push(MockSurfaceCall::Navigate {
            url: url.to_string(),
        });
        if state.fail_navigation {
            return Err(SurfaceError::Navigation {
                url: url.to_string(),
                reason: "mock navigation failure".to_string(),
            });
        }
        Ok(())
    }

    async fn fill_search(&self, term: &str) -> SurfaceResult<()> {
        let mut state = self.state.write().unwrap();
        state.calls.push(MockSurfaceCall::FillSearch {
            term: term.to_string(),
        });
        if state.failing_terms.iter().any(|t| t == term) {
            return Err(SurfaceError::ElementNotFound {
                query: self.selectors.search_input.clone(),
            });
        }
        state.current_term = Some(term.to_string());
        state.visible = 0;
        state.active = None;
        Ok(())
    }

    async fn submit_search(&self) -> SurfaceResult<()> {
        self.state
            .write()
            .unwrap()
            .calls
            .push(MockSurfaceCall::SubmitSearch);
        Ok(())
    }

    async fn reveal_more(&self) -> SurfaceResult<()> {
        let mut state = self.state.write().unwrap();
        state.calls.push(MockSurfaceCall::RevealMore);
        let available = state.listings().len();
        state.visible = state.visible.saturating_add(self.reveal_step).min(available);
        Ok(())
    }

    async fn count(&self, query: &str) -> SurfaceResult<usize> {
        if query == self.selectors.listing {
            Ok(self.visible())
        } else {
            Ok(0)
        }
    }

    async fn query_all(&self, query: &str) -> SurfaceResult<Vec<MockItem>> {
        if query == self.selectors.listing {
            Ok((0..self.visible()).map(MockItem).collect())
        } else {
            Ok(Vec::new())
        }
    }

    async fn scoped_texts(&self, item: &MockItem, query: &str) -> SurfaceResult<Vec<String>> {
        let state = self.state.read().unwrap();
        let listing = state
            .listings()
            .get(item.0)
            .ok_or_else(|| SurfaceError::ElementNotFound {
                query: format!("listing #{}", item.0),
            })?;

        if listing.fail_scoped {
            return Err(SurfaceError::Script(format!(
                "listing #{} detached from document",
                item.0
            )));
        }

        if query == self.selectors.gun_type {
            Ok(listing.gun_types.clone())
        } else if query == self.selectors.power {
            Ok(listing.power_ratings.clone())
        } else {
            Ok(Vec::new())
        }
    }

    async fn first_text(&self, query: &str) -> SurfaceResult<Option<String>> {
        let state = self.state.read().unwrap();
        let Some(listing) = state.active.and_then(|i| state.listings().get(i)) else {
            return Ok(None);
        };

        if query == self.selectors.name {
            Ok(listing.name.clone())
        } else if query == self.selectors.address {
            Ok(listing.address.clone())
        } else {
            Ok(None)
        }
    }

    async fn activate(&self, item: &MockItem) -> SurfaceResult<()> {
        let mut state = self.state.write().unwrap();
        state.calls.push(MockSurfaceCall::Activate { index: item.0 });

        let fail = match state.listings().get(item.0) {
            Some(listing) => listing.fail_activation,
            None => true,
        };
        if fail {
            state.active = None;
            return Err(SurfaceError::ElementNotFound {
                query: format!("listing #{}", item.0),
            });
        }

        state.active = Some(item.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reveal_step_grows_until_exhausted() {
        let surface = MockSurface::new()
            .with_reveal_step(2)
            .with_listings(vec![MockListing::new(); 5]);
        let listing = Selectors::default().listing;

        let mut seen = Vec::new();
        for _ in 0..4 {
            surface.reveal_more().await.unwrap();
            seen.push(surface.count(&listing).await.unwrap());
        }
        assert_eq!(seen, vec![2, 4, 5, 5]);
    }

    #[tokio::test]
    async fn test_detail_follows_activation() {
        let surface = MockSurface::new().with_listings(vec![
            MockListing::new().named("First"),
            MockListing::new().named("Second"),
        ]);
        let selectors = Selectors::default();
        surface.reveal_more().await.unwrap();

        assert_eq!(surface.first_text(&selectors.name).await.unwrap(), None);
        surface.activate(&MockItem(1)).await.unwrap();
        assert_eq!(
            surface.first_text(&selectors.name).await.unwrap().as_deref(),
            Some("Second")
        );
    }

    #[tokio::test]
    async fn test_new_search_resets_visible_listings() {
        let surface = MockSurface::new()
            .with_listings(vec![MockListing::new(); 3])
            .with_term_listings("other", vec![MockListing::new()]);

        surface.fill_search("first").await.unwrap();
        surface.reveal_more().await.unwrap();
        assert_eq!(surface.visible(), 3);

        surface.fill_search("other").await.unwrap();
        assert_eq!(surface.visible(), 0);
        surface.reveal_more().await.unwrap();
        assert_eq!(surface.visible(), 1);
    }
}
