//! Storage backed by a zip file.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use zip::result::ZipError;
use zip::ZipArchive;

use super::{is_hidden_entry, ArchiveStorage, StorageError, StorageResult};

/// Capsule packed as a zip file.
///
/// When every entry sits under one top-level folder, that folder is hidden:
/// names are reported relative to it, the way the manifest refers to them.
#[derive(Debug, Clone)]
pub struct ZipStorage {
    path: PathBuf,
    root_prefix: Option<String>,
}

impl ZipStorage {
    /// Open a zip file, reading its directory once to find a shared root folder.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let entries = Self::read_entries(path)?;
        let root_prefix = common_root(&entries);
        if let Some(ref prefix) = root_prefix {
            tracing::debug!("Zip {} has shared root {}", path.display(), prefix);
        }
        Ok(Self {
            path: path.to_path_buf(),
            root_prefix,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Content entries: no directories, no `__MACOSX`, no hidden files.
    fn read_entries(path: &Path) -> StorageResult<Vec<String>> {
        let mut archive = ZipArchive::new(File::open(path)?)?;
        let mut entries = Vec::new();

        for i in 0..archive.len() {
            let file = archive.by_index(i)?;
            let name = file.name().to_string();
            if file.is_dir() || is_hidden_entry(&name) {
                continue;
            }
            entries.push(name);
        }

        Ok(entries)
    }

    fn read_entry(path: &Path, entry: &str) -> StorageResult<Vec<u8>> {
        let mut archive = ZipArchive::new(File::open(path)?)?;
        let mut file = match archive.by_name(entry) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(StorageError::NotFound(entry.to_string())),
            Err(e) => return Err(StorageError::Zip(e)),
        };

        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        Ok(buffer)
    }

    fn entry_path(&self, name: &str) -> String {
        match self.root_prefix {
            Some(ref prefix) => format!("{}{}", prefix, name),
            None => name.to_string(),
        }
    }
}

#[async_trait]
impl ArchiveStorage for ZipStorage {
    async fn list_files(&self) -> StorageResult<Vec<String>> {
        let path = self.path.clone();
        let entries = tokio::task::spawn_blocking(move || Self::read_entries(&path))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))??;

        Ok(match self.root_prefix {
            Some(ref prefix) => entries
                .into_iter()
                .filter_map(|e| e.strip_prefix(prefix.as_str()).map(str::to_string))
                .collect(),
            None => entries,
        })
    }

    async fn extract_bytes(&self, name: &str) -> StorageResult<Vec<u8>> {
        let path = self.path.clone();
        let entry = self.entry_path(name);
        tokio::task::spawn_blocking(move || Self::read_entry(&path, &entry))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
            .map_err(|e| match e {
                StorageError::NotFound(_) => StorageError::NotFound(name.to_string()),
                other => other,
            })
    }
}

/// Shared `folder/` prefix of every entry, if there is exactly one.
fn common_root(entries: &[String]) -> Option<String> {
    let first = entries.first()?;
    let (root, _) = first.split_once('/')?;
    let prefix = format!("{}/", root);
    entries
        .iter()
        .all(|e| e.starts_with(&prefix))
        .then_some(prefix)
}
