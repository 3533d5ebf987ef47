//! Command-line arguments for the `blockfall` binary.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use crate::prefs::PrefsStore;
use crate::types::Theme;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Seed for the piece bag (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Preference file holding the high score and theme.
    #[arg(long, env = "BLOCKFALL_PREFS")]
    pub prefs: Option<PathBuf>,

    /// Colour theme for this run: dark, light or crazy.
    #[arg(long, value_parser = parse_theme)]
    pub theme: Option<Theme>,

    /// Write logs to this file. Nothing is logged otherwise.
    #[arg(long, env = "BLOCKFALL_LOG")]
    pub log_file: Option<PathBuf>,

    /// Log level filter.
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Args {
    pub fn prefs_store(&self) -> PrefsStore {
        match &self.prefs {
            Some(path) => PrefsStore::new(path.clone()),
            None => PrefsStore::default(),
        }
    }
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::from_str(s).ok_or_else(|| format!("unknown theme `{s}` (expected dark, light or crazy)"))
}
