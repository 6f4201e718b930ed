//! Property tests for the discovery loop.

use std::num::NonZeroUsize;

use maps_scraper::testing::MockItem;
use maps_scraper::{discover, DiscoverConfig, DiscoveryTarget, MockListing, MockSurface, Selectors, Termination};
use proptest::prelude::*;

fn surface(available: usize, step: usize) -> MockSurface {
    MockSurface::new()
        .with_reveal_step(step)
        .with_listings(vec![MockListing::new(); available])
}

fn config(total: usize) -> DiscoverConfig {
    DiscoverConfig::new(Selectors::default().listing)
        .with_target(DiscoveryTarget::from_total(NonZeroUsize::new(total)))
}

proptest! {
    #[test]
    fn returns_exactly_total_when_enough_are_available(
        total in 1usize..40,
        extra in 0usize..40,
        step in 1usize..15,
    ) {
        let surface = surface(total + extra, step);
        let found = tokio_test::block_on(discover(&surface, &config(total))).unwrap();

        prop_assert_eq!(found.termination, Termination::GoalReached);
        prop_assert_eq!(found.items, (0..total).map(MockItem).collect::<Vec<_>>());
    }

    #[test]
    fn returns_everything_when_list_stagnates_below_total(
        available in 0usize..40,
        missing in 1usize..40,
        step in 1usize..15,
    ) {
        let surface = surface(available, step);
        let found = tokio_test::block_on(discover(&surface, &config(available + missing))).unwrap();

        prop_assert_eq!(found.termination, Termination::Exhausted);
        prop_assert_eq!(found.items.len(), available);
        // every growing round plus the one that noticed the stall
        prop_assert_eq!(found.rounds, available.div_ceil(step) + 1);
    }

    #[test]
    fn unbounded_target_collects_all(available in 0usize..60, step in 1usize..20) {
        let surface = surface(available, step);
        let found = tokio_test::block_on(discover(&surface, &DiscoverConfig::new(Selectors::default().listing))).unwrap();

        prop_assert_eq!(found.items.len(), available);
    }
}
