//! Core trait abstractions for the scraper.
//!
//! Applications implement these to plug in a browser backend.

pub mod surface;
