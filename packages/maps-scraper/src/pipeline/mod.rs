//! Scraping pipeline: discovery, per-listing extraction and the batch driver.

pub mod batch;
pub mod discover;
pub mod extract;

pub use batch::{
    output_stem, prepare_search, run, scrape_term, start_session, RunSummary, TermFailure,
    TermReport, OUTPUT_PREFIX,
};
pub use discover::{discover, DiscoverConfig, Discovery, Termination};
pub use extract::{extract_all, extract_record, ExtractConfig, ExtractionOutcome, ItemFailure};
