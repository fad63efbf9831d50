//! Command-line interface definition using clap.

use clap::Parser;
use std::path::PathBuf;

/// Sync portfolio projects and profile from Notion into static files
#[derive(Parser, Debug)]
#[command(name = "folio-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Site root; output goes to <root>/src/data and <root>/public/notion
    #[arg(short, long, env = "FOLIO_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Keep remote image URLs instead of downloading images
    #[arg(long)]
    pub skip_assets: bool,
}

impl Cli {
    /// Tracing filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn,folio=info",
            1 => "warn,folio=debug",
            2 => "info,folio=trace",
            _ => "trace",
        }
    }
}
