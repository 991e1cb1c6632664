//! Embedded metadata for PDF and image items.
//!
//! Some manifest layouts leave title, description and tags empty on purpose;
//! those values come from the files themselves. Extraction runs once per
//! eligible item before scoring, and the merge step produces a new item list
//! rather than patching shared state.

mod pdfinfo;

pub use pdfinfo::{parse_pdfinfo_output, PdfInfoExtractor};

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use thiserror::Error;

use crate::models::ArchiveItem;
use crate::observer::InspectionObserver;
use crate::storage::ArchiveStorage;
use crate::utils::sanitize_text;

/// Errors that can occur during metadata extraction.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Values pulled from a file's embedded metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub keywords: Vec<String>,
    pub created: Option<DateTime<FixedOffset>>,
}

impl ExtractedMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.author.is_none()
            && self.keywords.is_empty()
            && self.created.is_none()
    }
}

/// Reads embedded metadata from a file's bytes.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Extract metadata, or `None` when the file carries none this extractor understands.
    async fn extract(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<Option<ExtractedMetadata>, MetadataError>;
}

/// Whether a file is a PDF or an image, judging by its name.
pub fn is_metadata_source(filename: &str) -> bool {
    match mime_guess::from_path(filename).first_raw() {
        Some(mime) => mime == "application/pdf" || mime.starts_with("image/"),
        None => false,
    }
}

/// Fetch and extract metadata for every PDF and image item concurrently.
///
/// Read and extraction failures are reported to `observer` and skipped; the
/// returned map is keyed by item filename.
pub async fn collect_metadata(
    items: &[ArchiveItem],
    storage: &dyn ArchiveStorage,
    extractor: &dyn MetadataExtractor,
    observer: &dyn InspectionObserver,
) -> HashMap<String, ExtractedMetadata> {
    let lookups = items
        .iter()
        .filter(|item| is_metadata_source(&item.filename))
        .map(|item| async move {
            let bytes = match storage.extract_bytes(&item.filename).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    observer.item_failed(&item.filename, &e.to_string());
                    return None;
                }
            };

            match extractor.extract(&item.filename, &bytes).await {
                Ok(Some(metadata)) if !metadata.is_empty() => {
                    Some((item.filename.clone(), metadata))
                }
                Ok(_) => None,
                Err(e) => {
                    observer.item_failed(&item.filename, &e.to_string());
                    None
                }
            }
        });

    futures::future::join_all(lookups)
        .await
        .into_iter()
        .flatten()
        .collect()
}

/// Merge extracted metadata into a new item list.
///
/// Empty titles and descriptions are filled from metadata; manifest values
/// win. Keywords not already present (trimmed, case-insensitive) are appended
/// to tags. Authors are left alone: only capsule items carry one.
pub fn merge_metadata(
    items: &[ArchiveItem],
    metadata: &HashMap<String, ExtractedMetadata>,
) -> Vec<ArchiveItem> {
    items
        .iter()
        .map(|item| match metadata.get(&item.filename) {
            Some(extracted) => merge_one(item, extracted),
            None => item.clone(),
        })
        .collect()
}

fn merge_one(item: &ArchiveItem, extracted: &ExtractedMetadata) -> ArchiveItem {
    let mut merged = item.clone();

    if merged.title.is_empty() {
        if let Some(title) = non_empty(&extracted.title) {
            merged.title = sanitize_text(title);
        }
    }
    if merged.description.is_empty() {
        if let Some(description) = non_empty(&extracted.description) {
            merged.description = sanitize_text(description);
        }
    }

    for keyword in &extracted.keywords {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            continue;
        }
        let keyword = sanitize_text(keyword);
        if !merged.has_tag(&keyword) {
            merged.tags.push(keyword);
        }
    }

    merged
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use crate::storage::MemoryStorage;

    fn pdf_item(name: &str) -> ArchiveItem {
        ArchiveItem {
            filename: name.into(),
            item_type: "НОВОСТЬ".into(),
            date: "2024-10-20".into(),
            ..ArchiveItem::default()
        }
    }

    struct FixedExtractor;

    #[async_trait]
    impl MetadataExtractor for FixedExtractor {
        async fn extract(
            &self,
            filename: &str,
            bytes: &[u8],
        ) -> Result<Option<ExtractedMetadata>, MetadataError> {
            if bytes == b"broken" {
                return Err(MetadataError::ExtractionFailed(filename.to_string()));
            }
            Ok(Some(ExtractedMetadata {
                title: Some(format!("Title of {}", filename)),
                keywords: vec!["one".into(), "two".into()],
                ..ExtractedMetadata::default()
            }))
        }
    }

    #[test]
    fn test_is_metadata_source() {
        assert!(is_metadata_source("01_Новость.pdf"));
        assert!(is_metadata_source("photo.JPG"));
        assert!(is_metadata_source("meme.png"));
        assert!(!is_metadata_source("clip.mp4"));
        assert!(!is_metadata_source("notes.txt"));
        assert!(!is_metadata_source("noext"));
    }

    #[test]
    fn test_merge_fills_empty_fields_and_appends_keywords() {
        let mut item = pdf_item("01.pdf");
        item.tags = vec!["Москва".into()];

        let mut metadata = HashMap::new();
        metadata.insert(
            "01.pdf".to_string(),
            ExtractedMetadata {
                title: Some("  Выборы  ".into()),
                description: Some("Итоги <дня>".into()),
                author: Some("Редакция".into()),
                keywords: vec![" москва ".into(), "выборы".into(), "".into(), "ВЫБОРЫ".into()],
                created: None,
            },
        );

        let merged = merge_metadata(&[item.clone()], &metadata);
        assert_eq!(merged[0].title, "Выборы");
        assert_eq!(merged[0].description, "Итоги &lt;дня&gt;");
        assert_eq!(merged[0].tags, vec!["Москва", "выборы"]);
        assert!(merged[0].author.is_none());
        // Source list untouched
        assert!(item.title.is_empty());
    }

    #[test]
    fn test_merge_keeps_manifest_values() {
        let mut item = pdf_item("01.pdf");
        item.title = "Из манифеста".into();

        let mut metadata = HashMap::new();
        metadata.insert(
            "01.pdf".to_string(),
            ExtractedMetadata {
                title: Some("Из файла".into()),
                ..ExtractedMetadata::default()
            },
        );

        let merged = merge_metadata(&[item], &metadata);
        assert_eq!(merged[0].title, "Из манифеста");
    }

    #[tokio::test]
    async fn test_collect_metadata_skips_failures() {
        let storage = MemoryStorage::new()
            .with_file("a.pdf", "pdf")
            .with_file("b.pdf", "broken")
            .with_file("c.mp4", "video");
        let items = vec![
            pdf_item("a.pdf"),
            pdf_item("b.pdf"),
            pdf_item("c.mp4"),
            pdf_item("missing.pdf"),
        ];

        let collected =
            collect_metadata(&items, &storage, &FixedExtractor, &NoopObserver).await;
        assert_eq!(collected.len(), 1);
        assert_eq!(
            collected["a.pdf"].title.as_deref(),
            Some("Title of a.pdf")
        );
    }
}
