//! Batch driver - search → discover → extract → export, one term at a time.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{error, info};

use crate::error::{Result, SurfaceError, SurfaceResult};
use crate::pipeline::discover::{discover, DiscoverConfig, Termination};
use crate::pipeline::extract::{extract_all, ExtractConfig, ItemFailure};
use crate::traits::surface::RenderSurface;
use crate::types::config::ScraperConfig;

/// Prefix of every per-term export file.
pub const OUTPUT_PREFIX: &str = "google_maps_data_";

/// What happened for one search term.
#[derive(Debug, Clone, Serialize)]
pub struct TermReport {
    /// The search term as submitted
    pub term: String,

    /// Listings returned by discovery
    pub discovered: usize,

    /// Records written
    pub extracted: usize,

    /// Listings skipped during extraction
    pub failures: Vec<ItemFailure>,

    /// Why discovery stopped
    pub termination: Termination,

    /// Files written (CSV then XLSX)
    pub files_written: Vec<PathBuf>,
}

/// A term that failed as a whole.
#[derive(Debug, Clone, Serialize)]
pub struct TermFailure {
    pub term: String,
    pub message: String,
}

/// Summary of a full run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Terms that completed, in input order
    pub completed: Vec<TermReport>,

    /// Terms that failed, in input order
    pub failed_terms: Vec<TermFailure>,
}

impl RunSummary {
    /// True when every term completed.
    pub fn is_success(&self) -> bool {
        self.failed_terms.is_empty()
    }

    /// Total records written across all terms.
    pub fn records_written(&self) -> usize {
        self.completed.iter().map(|r| r.extracted).sum()
    }
}

/// File stem for a term's exports: spaces become underscores.
pub fn output_stem(term: &str) -> String {
    format!("{OUTPUT_PREFIX}{term}").replace(' ', "_")
}

/// Open the start page and let it settle.
///
/// This is the only bounded wait in a run; a slow start page fails with
/// [`SurfaceError::Timeout`].
pub async fn start_session<S: RenderSurface>(surface: &S, config: &ScraperConfig) -> SurfaceResult<()> {
    info!("Opening {}", config.start_url);
    tokio::time::timeout(config.navigation_timeout, surface.navigate(&config.start_url))
        .await
        .map_err(|_| SurfaceError::Timeout {
            what: format!("navigation to {}", config.start_url),
            seconds: config.navigation_timeout.as_secs(),
        })??;
    tokio::time::sleep(config.delays.after_start).await;
    Ok(())
}

/// Type the term into the search box and submit it.
pub async fn prepare_search<S: RenderSurface>(
    surface: &S,
    term: &str,
    config: &ScraperConfig,
) -> SurfaceResult<()> {
    surface.fill_search(term).await?;
    tokio::time::sleep(config.delays.after_fill).await;

    surface.submit_search().await?;
    tokio::time::sleep(config.delays.after_submit).await;
    Ok(())
}

/// Scrape one term end to end and export its records.
pub async fn scrape_term<S: RenderSurface>(
    surface: &S,
    term: &str,
    config: &ScraperConfig,
) -> Result<TermReport> {
    prepare_search(surface, term, config).await?;

    let discovery = discover(surface, &DiscoverConfig::from_scraper_config(config)).await?;

    let outcome = extract_all(
        surface,
        &discovery.items,
        &ExtractConfig::from_scraper_config(config),
        &config.output_dir,
    )
    .await;

    let stem = output_stem(term);
    let excel = outcome.batch.save_to_excel(&stem)?;
    let csv = outcome.batch.save_to_csv(&stem)?;

    Ok(TermReport {
        term: term.to_string(),
        discovered: discovery.items.len(),
        extracted: outcome.batch.len(),
        failures: outcome.failures,
        termination: discovery.termination,
        files_written: vec![csv, excel],
    })
}

/// Scrape every term in order.
///
/// Each term has its own failure boundary: a failed term is recorded and the
/// next one starts, unless `config.fail_fast` is set, in which case the
/// first failure is returned.
pub async fn run<S, I, T>(surface: &S, terms: I, config: &ScraperConfig) -> Result<RunSummary>
where
    S: RenderSurface,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut summary = RunSummary::default();

    for (index, term) in terms.into_iter().enumerate() {
        let term = term.as_ref();
        info!("-----");
        info!("{} - {}", index, term);

        match scrape_term(surface, term, config).await {
            Ok(report) => {
                info!(
                    "Finished '{}': {} of {} listings extracted",
                    term, report.extracted, report.discovered
                );
                summary.completed.push(report);
            }
            Err(e) if config.fail_fast => return Err(e),
            Err(e) => {
                error!("Search '{}' failed: {}", term, e);
                summary.failed_terms.push(TermFailure {
                    term: term.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(summary)
}
