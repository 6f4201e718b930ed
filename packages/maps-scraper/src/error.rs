//! Typed errors for the scraper library.
//!
//! Uses `thiserror` for library errors (not `anyhow`); the binary wraps
//! these with context.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`RenderSurface`](crate::traits::surface::RenderSurface).
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Browser could not be started
    #[error("failed to launch browser: {0}")]
    Launch(String),

    /// Navigation to a URL failed
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// A bounded wait expired
    #[error("timed out after {seconds}s waiting for {what}")]
    Timeout { what: String, seconds: u64 },

    /// A required element was not present
    #[error("element not found: {query}")]
    ElementNotFound { query: String },

    /// A page script returned something unexpected
    #[error("script error: {0}")]
    Script(String),

    /// Underlying automation protocol error
    #[error("browser error: {0}")]
    Browser(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors that can occur while writing tables to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Output directory could not be created
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// XLSX serialization failed
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Plain I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration and input errors, raised before any browsing starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `-s` nor the input file produced a search term
    #[error("You must either pass the -s search argument, or add searches to {input_file}")]
    NoSearchTerms { input_file: String },

    /// Input file exists but could not be read
    #[error("failed to read {path}: {source}")]
    InputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An environment variable held an unusable value
    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },
}

/// Errors that fail a whole search term.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for scrape operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for surface operations.
pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// Result type alias for export operations.
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Result type alias for configuration.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
