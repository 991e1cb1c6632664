//! Top-level errors for an inspection run.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Failures that stop an inspection. Manifest line problems are reported as
/// data on [`crate::Inspection`], not through this type.
#[derive(Debug, Error)]
pub enum CapsuleError {
    #[error("No manifest found in archive (looked for: {})", .0.join(", "))]
    ManifestNotFound(Vec<String>),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
