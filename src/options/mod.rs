//! Visualizer options with TOML preset support.
//!
//! Playback (algorithm, size, speed) and explanation-service settings are
//! consolidated here. Options serialize to/from TOML so a session can be
//! started from a preset file, and expose a JSON Schema a control surface
//! can build its sliders from.

mod explain;
mod playback;

use std::path::Path;

pub use explain::ExplainOptions;
pub use playback::PlaybackOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SortlabError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[playback]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Algorithm, size and speed.
    pub playback: PlaybackOptions,
    /// Explanation service settings.
    pub explain: ExplainOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SortlabError::Io`] if the file cannot be read and
    /// [`SortlabError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, SortlabError> {
        let content = std::fs::read_to_string(path).map_err(SortlabError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| SortlabError::OptionsParse(e.to_string()))?;
        log::info!("Loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`SortlabError::OptionsParse`] on serialization failure and
    /// [`SortlabError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SortlabError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SortlabError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SortlabError::Io)?;
        }
        std::fs::write(path, content).map_err(SortlabError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
