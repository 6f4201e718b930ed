//! Search term loading.
//!
//! A term passed on the command line wins; otherwise terms come from a
//! line-delimited file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{ConfigError, ConfigResult};

/// Resolve the list of search terms.
///
/// Lines are trimmed and blank lines skipped. A missing file is treated the
/// same as an empty one. Fails with [`ConfigError::NoSearchTerms`] when no
/// term is left.
pub fn load_search_terms(search: Option<&str>, input_file: &Path) -> ConfigResult<Vec<String>> {
    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(vec![term.to_string()]);
    }

    let terms = if input_file.exists() {
        let content = fs::read_to_string(input_file).map_err(|source| ConfigError::InputFile {
            path: input_file.to_path_buf(),
            source,
        })?;
        parse_terms(&content)
    } else {
        Vec::new()
    };

    if terms.is_empty() {
        return Err(ConfigError::NoSearchTerms {
            input_file: input_file.display().to_string(),
        });
    }

    info!("Loaded {} search terms from {}", terms.len(), input_file.display());
    Ok(terms)
}

/// Split file content into trimmed, non-empty lines.
pub fn parse_terms(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
