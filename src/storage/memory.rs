//! In-memory archive storage.

use async_trait::async_trait;

use super::{ArchiveStorage, StorageError, StorageResult};

/// Archive held entirely in memory, listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Vec<(String, Vec<u8>)>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        let name = name.into();
        let content = content.into();
        match self.files.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = content,
            None => self.files.push((name, content)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    /// Remove a file, returning its content if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        let index = self.files.iter().position(|(existing, _)| existing == name)?;
        Some(self.files.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl ArchiveStorage for MemoryStorage {
    async fn list_files(&self) -> StorageResult<Vec<String>> {
        Ok(self.files.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn extract_bytes(&self, name: &str) -> StorageResult<Vec<u8>> {
        self.files
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }
}
