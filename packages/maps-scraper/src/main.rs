// Command-line entry point for the Maps scraper

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use maps_scraper::types::config::DEFAULT_INPUT_FILE;
use maps_scraper::{load_search_terms, run, start_session, ChromiumSurface, DiscoveryTarget, ScraperConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "maps-scraper")]
#[command(about = "Scrape EV charging stations from Google Maps search results")]
struct Cli {
    /// Search for a single term instead of reading the input file
    #[arg(short, long)]
    search: Option<String>,

    /// Stop after this many listings per search (default: all of them)
    #[arg(short, long)]
    total: Option<NonZeroUsize>,

    /// Line-delimited file of search terms
    #[arg(short, long, default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Directory to write CSV and XLSX files into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run the browser without a window
    #[arg(long)]
    headless: bool,

    /// Stop at the first search that fails
    #[arg(long)]
    fail_fast: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,maps_scraper=debug,chromiumoxide=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Resolve search terms before touching the browser
    let terms = load_search_terms(cli.search.as_deref(), &cli.input)?;

    let mut config = ScraperConfig::from_env()
        .context("Failed to load configuration")?
        .with_target(DiscoveryTarget::from_total(cli.total))
        .fail_fast(cli.fail_fast);
    if let Some(output) = cli.output {
        config = config.with_output_dir(output);
    }
    if cli.headless {
        config = config.headless(true);
    }
    tracing::info!("Configuration loaded, {} search terms", terms.len());

    let surface = ChromiumSurface::launch(config.headless, config.selectors.clone())
        .await
        .context("Failed to launch browser")?;

    let result = async {
        start_session(&surface, &config)
            .await
            .context("Failed to open start page")?;
        run(&surface, &terms, &config)
            .await
            .context("Scrape run aborted")
    }
    .await;

    if let Err(e) = surface.close().await {
        tracing::warn!("Failed to close browser cleanly: {}", e);
    }

    let summary = result?;
    tracing::info!(
        "Done: {} terms completed, {} records written",
        summary.completed.len(),
        summary.records_written()
    );

    if !summary.is_success() {
        let failed: Vec<_> = summary.failed_terms.iter().map(|f| f.term.as_str()).collect();
        bail!("{} search terms failed: {}", failed.len(), failed.join(", "));
    }

    Ok(())
}
