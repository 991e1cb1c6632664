//! Archive storage backends for capsule content.
//!
//! The engine only needs three things from storage: the list of files in the
//! capsule, their raw bytes and their text. Backends exist for zip files,
//! already-extracted directories and in-memory fixtures.

mod directory;
mod memory;
mod zip_archive;

pub use directory::DirectoryStorage;
pub use memory::MemoryStorage;
pub use zip_archive::ZipStorage;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from archive storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found in archive: {0}")]
    NotFound(String),

    #[error("Invalid archive entry name: {0}")]
    InvalidName(String),

    #[error("Unsupported archive format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Background task failed: {0}")]
    Task(String),
}

/// Read access to the files bundled in a capsule.
#[async_trait]
pub trait ArchiveStorage: Send + Sync {
    /// All file names in the archive, in a stable order.
    async fn list_files(&self) -> StorageResult<Vec<String>>;

    /// Raw bytes of one file. Fails with `NotFound` when absent.
    async fn extract_bytes(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Text of one file, decoded as UTF-8 with invalid sequences replaced.
    async fn extract_text(&self, name: &str) -> StorageResult<String> {
        let bytes = self.extract_bytes(name).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Open a capsule from disk: a directory or a `.zip` file.
pub fn open_storage(path: &Path) -> StorageResult<Box<dyn ArchiveStorage>> {
    if path.is_dir() {
        return Ok(Box::new(DirectoryStorage::new(path)));
    }

    let is_zip = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if is_zip {
        return Ok(Box::new(ZipStorage::open(path)?));
    }

    if !path.exists() {
        return Err(StorageError::NotFound(path.display().to_string()));
    }
    Err(StorageError::UnsupportedFormat(path.display().to_string()))
}

/// Reject entry names that could escape the archive root.
pub(crate) fn validate_entry_name(name: &str) -> StorageResult<()> {
    let escapes = name.starts_with('/')
        || name.starts_with('\\')
        || name.split(['/', '\\']).any(|segment| segment == "..");
    if name.is_empty() || escapes {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Whether an entry is archive bookkeeping rather than capsule content.
pub(crate) fn is_hidden_entry(path: &str) -> bool {
    path.starts_with("__MACOSX")
        || path
            .rsplit('/')
            .next()
            .is_some_and(|name| name.starts_with('.'))
}
