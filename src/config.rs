//! Configuration for capsule inspection, discovered with the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::ScoringPolicy;

/// Manifest names looked up when no configuration overrides them.
pub const DEFAULT_MANIFEST_NAMES: &[&str] = &["manifest.txt", "манифест.txt"];

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
}

/// Inspection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest file names, matched case-insensitively; first match wins.
    pub manifest_names: Vec<String>,

    /// Completion thresholds.
    pub policy: ScoringPolicy,

    /// Path of the file this config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_names: DEFAULT_MANIFEST_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            policy: ScoringPolicy::default(),
            source_path: None,
        }
    }
}

impl Config {
    /// Load configuration using prefer for discovery.
    /// Falls back to defaults when no `capsule` config file is found or it
    /// cannot be parsed.
    pub async fn load() -> Self {
        match prefer::load("capsule").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => match Self::load_from_path(path).await {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!("Ignoring config: {}", e);
                        Self::default()
                    }
                },
                None => Self::default(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// TOML and YAML are chosen by extension; anything else is read as JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_error = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents).map_err(|e| parse_error("TOML", e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).map_err(|e| parse_error("YAML", e.to_string()))?
            }
            _ => serde_json::from_str(&contents).map_err(|e| parse_error("JSON", e.to_string()))?,
        };

        if config.manifest_names.is_empty() {
            config.manifest_names = Self::default().manifest_names;
        }
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand `~` in a user-supplied path.
    pub fn resolve_path(path_str: &str) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        PathBuf::from(expanded.as_ref())
    }

    /// Find the manifest in an archive listing.
    pub fn find_manifest<'a>(&self, listing: &'a [String]) -> Option<&'a String> {
        self.manifest_names.iter().find_map(|wanted| {
            listing
                .iter()
                .find(|file| file.to_lowercase() == wanted.to_lowercase())
        })
    }
}
