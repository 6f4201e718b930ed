//! Data types for the scraper.

pub mod config;
pub mod popular_times;
pub mod record;
pub mod table;
