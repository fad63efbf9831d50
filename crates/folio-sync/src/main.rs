//! Notion sync entry point.
//!
//! Run from the site root before building:
//! ```bash
//! NOTION_TOKEN=xxx NOTION_PROJECT_DB_IDS=db1,db2 cargo run -p folio-sync
//! ```

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use folio_sync::cli::Cli;
use folio_sync::config::load_env_files;
use folio_sync::{SyncConfig, Synchronizer};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    load_env_files(&cli.root);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    fmt().with_env_filter(filter).with_target(false).init();

    if let Err(e) = run(&cli).await {
        tracing::error!(error = %e, "Sync failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> folio_sync::Result<()> {
    let mut config = SyncConfig::from_env(&cli.root)?;
    if cli.skip_assets {
        config.localize_assets = false;
    }
    tracing::debug!(config = ?config, "Resolved configuration");

    Synchronizer::from_config(config).run().await?;
    Ok(())
}
