//! Google Maps EV Charging Station Scraper
//!
//! Searches Maps for each term, scrolls the infinite results list until
//! enough listings are loaded, extracts one record per listing and saves the
//! records as CSV and XLSX.
//!
//! # Usage
//!
//! ```rust,ignore
//! use maps_scraper::{run, start_session, ChromiumSurface, ScraperConfig};
//!
//! let config = ScraperConfig::from_env()?;
//! let surface = ChromiumSurface::launch(config.headless, config.selectors.clone()).await?;
//!
//! start_session(&surface, &config).await?;
//! let summary = run(&surface, ["ev charging station berlin"], &config).await?;
//! println!("{} records written", summary.records_written());
//! ```
//!
//! # Modules
//!
//! - [`traits`] - The `RenderSurface` abstraction over the browser
//! - [`types`] - Records, batches, tables and configuration
//! - [`pipeline`] - Discovery loop, field extractor and batch driver
//! - [`export`] - CSV / XLSX writers
//! - [`input`] - Search term loading
//! - [`surfaces`] - Browser implementations
//! - [`testing`] - Scripted surface for tests

pub mod error;
pub mod export;
pub mod input;
pub mod pipeline;
pub mod surfaces;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ConfigError, ExportError, ScrapeError, SurfaceError};
pub use traits::surface::RenderSurface;
pub use types::{
    config::{Delays, DiscoveryTarget, ScraperConfig, Selectors},
    popular_times::PopularTimeSlot,
    record::{Record, RecordBatch, JOIN_SEPARATOR},
    table::{Table, Tabular},
};

// Re-export pipeline entry points
pub use pipeline::{
    discover, extract_all, extract_record, output_stem, prepare_search, run, scrape_term,
    start_session, DiscoverConfig, Discovery, ExtractConfig, ExtractionOutcome, ItemFailure,
    RunSummary, Termination, TermReport,
};

pub use input::load_search_terms;

#[cfg(feature = "chromium")]
pub use surfaces::ChromiumSurface;

// Re-export testing utilities
pub use testing::{MockListing, MockSurface};
