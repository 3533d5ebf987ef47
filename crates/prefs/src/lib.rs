//! Preference persistence: the high score and the colour theme.
//!
//! Stored as a small JSON object in the user's config directory:
//!
//! ```json
//! { "high_score": 1200, "theme": "dark" }
//! ```
//!
//! Loading never fails. A missing file yields the defaults, and each field
//! that is absent or malformed falls back on its own (high score 0, theme
//! `dark`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

pub use blockfall_types as types;

use crate::types::Theme;

/// Directory under the config dir that holds the preference file.
pub const APP_DIR: &str = "blockfall";
pub const PREFS_FILE: &str = "prefs.json";

/// The persisted preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub high_score: u32,
    pub theme: Theme,
}

#[derive(Serialize)]
struct StoredPrefs<'a> {
    high_score: u32,
    theme: &'a str,
}

impl Preferences {
    /// Parse stored JSON, defaulting each field that is missing or malformed.
    pub fn from_json(text: &str) -> Self {
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "preference file is not valid JSON, using defaults");
                return Self::default();
            }
        };

        let high_score = value
            .get("high_score")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0);
        let theme = value
            .get("theme")
            .and_then(Value::as_str)
            .and_then(Theme::from_str)
            .unwrap_or_default();

        Self { high_score, theme }
    }

    pub fn to_json(&self) -> Result<String> {
        let stored = StoredPrefs {
            high_score: self.high_score,
            theme: self.theme.as_str(),
        };
        serde_json::to_string_pretty(&stored).context("failed to encode preferences")
    }
}

/// Reads and writes [`Preferences`] at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/blockfall/prefs.json`, or the working directory when
    /// the platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(PREFS_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences, falling back to defaults on any failure.
    pub fn load(&self) -> Preferences {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let prefs = Preferences::from_json(&text);
                info!(
                    path = %self.path.display(),
                    high_score = prefs.high_score,
                    theme = prefs.theme.as_str(),
                    "preferences loaded"
                );
                prefs
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no preference file yet");
                Preferences::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read preferences");
                Preferences::default()
            }
        }
    }

    /// Write preferences, creating the parent directory if needed.
    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create config directory {}", parent.display())
                })?;
            }
        }

        let json = prefs.to_json()?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            high_score = prefs.high_score,
            theme = prefs.theme.as_str(),
            "preferences saved"
        );
        Ok(())
    }
}

impl Default for PrefsStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
