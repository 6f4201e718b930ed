//! Configuration types for discovery, extraction and export.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default landing page for a scraping session.
pub const DEFAULT_START_URL: &str = "https://www.google.com/maps";

/// Default directory that exports are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default line-delimited search term file.
pub const DEFAULT_INPUT_FILE: &str = "input.txt";

/// How many items the discovery loop should collect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscoveryTarget {
    /// Keep scrolling until the result list stops growing.
    #[default]
    Unbounded,

    /// Stop as soon as this many items are visible.
    AtMost(NonZeroUsize),
}

impl DiscoveryTarget {
    /// Build a target from an optional count; `None` means unbounded.
    pub fn from_total(total: Option<NonZeroUsize>) -> Self {
        total.map_or(Self::Unbounded, Self::AtMost)
    }

    /// Returns the limit if one is set.
    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::AtMost(n) => Some(n.get()),
        }
    }

    /// Whether `count` visible items satisfies the target.
    pub fn is_reached(&self, count: usize) -> bool {
        self.limit().is_some_and(|limit| count >= limit)
    }
}

/// Fixed settle delays inserted after each surface action.
///
/// These stand in for "wait until asynchronous rendering settles".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delays {
    /// After the start page has loaded
    pub after_start: Duration,

    /// After typing the search term
    pub after_fill: Duration,

    /// After submitting the search
    pub after_submit: Duration,

    /// After each scroll of the results list
    pub scroll_settle: Duration,

    /// After activating a listing, before reading its details
    pub activate_settle: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            after_start: Duration::from_secs(5),
            after_fill: Duration::from_secs(3),
            after_submit: Duration::from_secs(5),
            scroll_settle: Duration::from_secs(3),
            activate_settle: Duration::from_secs(5),
        }
    }
}

impl Delays {
    /// All delays zero. Used with scripted surfaces.
    pub fn none() -> Self {
        Self {
            after_start: Duration::ZERO,
            after_fill: Duration::ZERO,
            after_submit: Duration::ZERO,
            scroll_settle: Duration::ZERO,
            activate_settle: Duration::ZERO,
        }
    }
}

/// CSS selectors for the pieces of markup the scraper reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    /// Search box on the landing page
    pub search_input: String,

    /// Scrollable container holding the results
    pub results_feed: String,

    /// One match per discovered listing
    pub listing: String,

    /// Place title in the detail pane
    pub name: String,

    /// Address line in the detail pane
    pub address: String,

    /// Connector type labels, scoped to a listing
    pub gun_type: String,

    /// Connector power labels, scoped to a listing
    pub power: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            search_input: "input#searchboxinput".to_string(),
            results_feed: "div[role=\"feed\"]".to_string(),
            listing: "a[href*=\"https://www.google.com/maps/place\"]".to_string(),
            name: "h1.DUwDvf.lfPIob".to_string(),
            address: "button[data-item-id=\"address\"] div.fontBodyMedium".to_string(),
            gun_type: "div.bfdHYd.Ppzolf.OFBs3e span.JpCtJf".to_string(),
            power: "div.bfdHYd.Ppzolf.OFBs3e span.NiVgee.WAmrC".to_string(),
        }
    }
}

/// Top-level configuration for a scraping run.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Page opened before the first search
    pub start_url: String,

    /// Directory exports are written into
    pub output_dir: PathBuf,

    /// How many listings to collect per search term
    pub target: DiscoveryTarget,

    /// Optional cap on scroll rounds per term. `None` keeps scrolling until
    /// the target is reached or the list stops growing.
    pub max_scroll_rounds: Option<usize>,

    /// Run the browser without a window
    pub headless: bool,

    /// Abort the run on the first failed term instead of moving on
    pub fail_fast: bool,

    /// Timeout for the initial navigation to `start_url`
    pub navigation_timeout: Duration,

    /// Settle delays
    pub delays: Delays,

    /// Markup selectors
    pub selectors: Selectors,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            target: DiscoveryTarget::Unbounded,
            max_scroll_rounds: None,
            headless: false,
            fail_fast: false,
            navigation_timeout: Duration::from_secs(60),
            delays: Delays::default(),
            selectors: Selectors::default(),
        }
    }
}

impl ScraperConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file if present, then any `MAPS_SCRAPER_*` overrides.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("MAPS_SCRAPER_START_URL") {
            config.start_url = url;
        }
        if let Some(dir) = lookup("MAPS_SCRAPER_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(headless) = parse_var::<bool, _>(&lookup, "MAPS_SCRAPER_HEADLESS")? {
            config.headless = headless;
        }
        if let Some(rounds) = parse_var::<usize, _>(&lookup, "MAPS_SCRAPER_MAX_SCROLL_ROUNDS")? {
            config.max_scroll_rounds = Some(rounds);
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "MAPS_SCRAPER_NAVIGATION_TIMEOUT_SECS")? {
            config.navigation_timeout = Duration::from_secs(secs);
        }

        let delays = &mut config.delays;
        for (key, slot) in [
            ("MAPS_SCRAPER_START_DELAY_MS", &mut delays.after_start),
            ("MAPS_SCRAPER_FILL_DELAY_MS", &mut delays.after_fill),
            ("MAPS_SCRAPER_SUBMIT_DELAY_MS", &mut delays.after_submit),
            ("MAPS_SCRAPER_SCROLL_DELAY_MS", &mut delays.scroll_settle),
            ("MAPS_SCRAPER_ACTIVATE_DELAY_MS", &mut delays.activate_settle),
        ] {
            if let Some(ms) = parse_var::<u64, _>(&lookup, key)? {
                *slot = Duration::from_millis(ms);
            }
        }

        Ok(config)
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the discovery target.
    pub fn with_target(mut self, target: DiscoveryTarget) -> Self {
        self.target = target;
        self
    }

    /// Cap the number of scroll rounds per term.
    pub fn with_max_scroll_rounds(mut self, rounds: usize) -> Self {
        self.max_scroll_rounds = Some(rounds);
        self
    }

    /// Set the settle delays.
    pub fn with_delays(mut self, delays: Delays) -> Self {
        self.delays = delays;
        self
    }

    /// Set the markup selectors.
    pub fn with_selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Run headless.
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Abort on the first failed term.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map(Some).map_err(|_| ConfigError::InvalidEnv {
            key: key.to_string(),
            value,
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_timings() {
        let config = ScraperConfig::default();
        assert_eq!(config.start_url, DEFAULT_START_URL);
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.target, DiscoveryTarget::Unbounded);
        assert_eq!(config.delays.scroll_settle, Duration::from_secs(3));
        assert_eq!(config.delays.activate_settle, Duration::from_secs(5));
        assert_eq!(config.navigation_timeout, Duration::from_secs(60));
        assert!(!config.headless);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ScraperConfig::from_lookup(lookup_from(&[
            ("MAPS_SCRAPER_OUTPUT_DIR", "/tmp/out"),
            ("MAPS_SCRAPER_HEADLESS", "true"),
            ("MAPS_SCRAPER_SCROLL_DELAY_MS", "250"),
            ("MAPS_SCRAPER_MAX_SCROLL_ROUNDS", "40"),
        ]))
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert!(config.headless);
        assert_eq!(config.delays.scroll_settle, Duration::from_millis(250));
        assert_eq!(config.max_scroll_rounds, Some(40));
        // untouched values keep their defaults
        assert_eq!(config.delays.after_fill, Duration::from_secs(3));
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = ScraperConfig::from_lookup(lookup_from(&[("MAPS_SCRAPER_HEADLESS", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref key, .. } if key == "MAPS_SCRAPER_HEADLESS"));
    }

    #[test]
    fn test_target_reached() {
        let unbounded = DiscoveryTarget::Unbounded;
        assert!(!unbounded.is_reached(usize::MAX));

        let two = DiscoveryTarget::from_total(NonZeroUsize::new(2));
        assert!(!two.is_reached(1));
        assert!(two.is_reached(2));
        assert!(two.is_reached(7));
    }
}
