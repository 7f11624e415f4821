//! `scrape` command handler.
//!
//! Resolves the run inputs (categories, selectors, output path) from config
//! and flags, wires Ctrl-C to cancellation, runs the catalog pipeline and
//! writes whatever it returned, partial or not.

use std::path::PathBuf;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use bigc_core::{AppConfig, CategoryConfig};
use bigc_scraper::{run_catalog, ChromiumLauncher, ListingClient, RunSettings};

use crate::output::write_snapshot;

/// Flag overrides for one scrape run.
#[derive(Debug, Default)]
pub(crate) struct ScrapeArgs {
    pub(crate) output: Option<PathBuf>,
    pub(crate) categories: Option<PathBuf>,
    pub(crate) only: Vec<String>,
    pub(crate) dry_run: bool,
}

/// Loads the category file and narrows it to `args.only`, keeping file order.
pub(crate) fn resolve_categories(
    config: &AppConfig,
    args: &ScrapeArgs,
) -> anyhow::Result<Vec<CategoryConfig>> {
    let path = args
        .categories
        .as_deref()
        .unwrap_or(config.categories_path.as_path());
    let file = bigc_core::load_categories(path)
        .with_context(|| format!("failed to load categories from {}", path.display()))?;
    Ok(file.select(&args.only)?)
}

fn listing_client(config: &AppConfig) -> anyhow::Result<ListingClient> {
    ListingClient::from_config(config).context("failed to build listing client")
}

/// Run the full scrape and write the snapshot.
///
/// # Errors
///
/// Returns an error if the category or selector files are invalid, the
/// listing client or browser cannot be started, or the snapshot cannot be
/// written. Listing and detail failures inside the run are logged, not
/// returned.
pub(crate) async fn run_scrape(config: &AppConfig, args: &ScrapeArgs) -> anyhow::Result<()> {
    let categories = resolve_categories(config, args)?;

    if args.dry_run {
        let slugs: Vec<&str> = categories.iter().map(|c| c.slug.as_str()).collect();
        println!(
            "dry-run: would scrape {} categories: [{}]",
            categories.len(),
            slugs.join(", ")
        );
        return Ok(());
    }

    let selectors = bigc_core::load_selectors(config.selectors_path.as_deref())
        .context("failed to load selectors")?;
    let client = listing_client(config)?;
    let launcher = ChromiumLauncher::from_config(config);
    let settings = RunSettings::from_config(config, selectors);
    let output = args.output.clone().unwrap_or_else(|| config.output_path.clone());

    let cancel = CancellationToken::new();
    let signal_task = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            crate::shutdown_signal().await;
            cancel.cancel();
            crate::shutdown_signal().await;
            tracing::warn!("second shutdown signal, exiting without writing a snapshot");
            std::process::exit(130);
        }
    });

    let result = run_catalog(&launcher, &client, &categories, &settings, &cancel).await;
    signal_task.abort();
    let snapshot = result.context("catalog run failed")?;

    write_snapshot(&output, &snapshot)?;

    let status = if snapshot.cancelled {
        "partial (cancelled)"
    } else {
        "complete"
    };
    println!(
        "scrape {status}: {} products written to {}",
        snapshot.len(),
        output.display()
    );
    Ok(())
}
