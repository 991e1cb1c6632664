//! Storage backed by an already-extracted capsule directory.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{is_hidden_entry, validate_entry_name, ArchiveStorage, StorageError, StorageResult};

/// Capsule extracted to a directory on disk.
///
/// File names are paths relative to the root, `/`-separated, sorted.
#[derive(Debug, Clone)]
pub struct DirectoryStorage {
    root: PathBuf,
}

impl DirectoryStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn walk(root: &Path) -> StorageResult<Vec<String>> {
        let mut files = Vec::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                let file_type = entry.file_type()?;
                let path = entry.path();
                if file_type.is_dir() {
                    pending.push(path);
                    continue;
                }
                // Symlinked directories are not followed
                if file_type.is_symlink() && path.is_dir() {
                    tracing::debug!("Skipping symlinked directory {}", path.display());
                    continue;
                }

                let Ok(relative) = path.strip_prefix(root) else {
                    continue;
                };
                let name = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                if !is_hidden_entry(&name) {
                    files.push(name);
                }
            }
        }

        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl ArchiveStorage for DirectoryStorage {
    async fn list_files(&self) -> StorageResult<Vec<String>> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || Self::walk(&root))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }

    async fn extract_bytes(&self, name: &str) -> StorageResult<Vec<u8>> {
        validate_entry_name(name)?;
        match tokio::fs::read(self.root.join(name)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_directory_listing_is_relative_and_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("media")).unwrap();
        fs::write(dir.path().join("manifest.txt"), "# empty").unwrap();
        fs::write(dir.path().join("media/05_мем.png"), b"png").unwrap();
        fs::write(dir.path().join(".DS_Store"), b"junk").unwrap();

        let storage = DirectoryStorage::new(dir.path());
        let files = storage.list_files().await.unwrap();
        assert_eq!(files, vec!["manifest.txt", "media/05_мем.png"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_directory_symlink_loop_is_not_followed() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("manifest.txt"), "# empty").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let storage = DirectoryStorage::new(dir.path());
        assert_eq!(storage.list_files().await.unwrap(), vec!["manifest.txt"]);
    }

    #[tokio::test]
    async fn test_directory_extract() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "привет мир").unwrap();

        let storage = DirectoryStorage::new(dir.path());
        assert_eq!(storage.extract_text("a.txt").await.unwrap(), "привет мир");
        assert!(matches!(
            storage.extract_bytes("missing.txt").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.extract_bytes("../a.txt").await,
            Err(StorageError::InvalidName(_))
        ));
    }
}
