#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the file the environment is persisted in, relative to the course
/// root.
pub const ENV_FILENAME: &str = ".coursekit.json";

/// Values carried from one `configure` run to the next and put on every
/// title page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidesEnv {
    /// Author of the slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author:      Option<String>,
    /// How to reach the author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact:     Option<String>,
    /// Additional line for the title page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_extra: Option<String>,
}

impl SlidesEnv {
    /// Location of the environment file below `base_path`.
    pub fn path(base_path: &Path) -> PathBuf {
        base_path.join(ENV_FILENAME)
    }

    /// Loads the environment of `base_path`. A missing file yields the empty
    /// environment.
    pub fn load(base_path: &Path) -> Result<Self> {
        let path = Self::path(base_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Could not parse {}", path.display()))
    }

    /// Writes the environment to `base_path`.
    pub fn save(&self, base_path: &Path) -> Result<()> {
        let path = Self::path(base_path);
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, text + "\n")
            .with_context(|| format!("Could not write {}", path.display()))
    }

    /// Takes every value set in `overrides`. Returns whether anything changed.
    pub fn merge(&mut self, overrides: SlidesEnv) -> bool {
        let before = self.clone();
        if overrides.author.is_some() {
            self.author = overrides.author;
        }
        if overrides.contact.is_some() {
            self.contact = overrides.contact;
        }
        if overrides.title_extra.is_some() {
            self.title_extra = overrides.title_extra;
        }
        *self != before
    }
}
