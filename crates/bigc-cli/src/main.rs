mod output;
mod scrape;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bigc-cli")]
#[command(about = "Big C storefront catalog scraper")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Walk the configured categories and write a JSON product snapshot
    Scrape {
        /// Snapshot file to write (overrides `BIGC_OUTPUT_PATH`)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Category YAML file (overrides `BIGC_CATEGORIES_PATH`)
        #[arg(long)]
        categories: Option<PathBuf>,
        /// Only scrape this category slug; repeat for several
        #[arg(long = "category", value_name = "SLUG")]
        category: Vec<String>,
        /// Print the categories that would be scraped and exit
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bigc_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Scrape {
            output,
            categories,
            category,
            dry_run,
        }) => {
            let args = scrape::ScrapeArgs {
                output,
                categories,
                only: category,
                dry_run,
            };
            scrape::run_scrape(&config, &args).await?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}

/// Resolves once Ctrl-C (or SIGTERM on unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal");
}

#[cfg(test)]
mod tests;
