//! End-to-end inspection of in-memory capsules.

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use capsule::metadata::{ExtractedMetadata, MetadataError, MetadataExtractor};
use capsule::models::ValidationErrorKind;
use capsule::storage::{MemoryStorage, StorageResult};
use capsule::{
    ArchiveStorage, CapsuleError, CapsuleInspector, Config, NoopObserver, ScoringPolicy,
    StorageError,
};

use common::{complete_storage, words};

fn inspector(storage: impl ArchiveStorage + 'static) -> CapsuleInspector {
    CapsuleInspector::new(Box::new(storage)).with_observer(Arc::new(NoopObserver))
}

#[tokio::test]
async fn test_complete_capsule_scores_100() {
    let inspection = inspector(complete_storage()).inspect().await.unwrap();

    assert!(inspection.errors.is_empty());
    assert_eq!(inspection.items.len(), 13);

    let report = inspection.report.as_ref().unwrap();
    assert_eq!(report.news.achieved, 5);
    assert_eq!(report.personal.achieved, 2);
    assert_eq!(report.memes.achieved, 5);
    assert!(report.capsule.passed);
    assert_eq!(report.required, 33);
    assert_eq!(report.achieved, 33);
    assert_eq!(report.percentage, 100);
    assert!(report.extra_files.is_empty());
    assert!(report.missing_files.is_empty());
    assert!(inspection.is_complete());
}

#[tokio::test]
async fn test_short_and_missing_explanations() {
    let mut storage = complete_storage();
    storage.insert("06_personal_объяснение.txt", words(40));
    let storage = without(storage, "08_meme_explanation.txt");

    let inspection = inspector(storage).inspect().await.unwrap();
    let report = inspection.report.unwrap();

    assert_eq!(report.personal_explanations.achieved, 1);
    assert_eq!(report.meme_explanations.achieved, 4);
    assert_eq!(report.achieved, 31);
    assert_eq!(report.percentage, 94);

    let short = report
        .explanation_checks
        .iter()
        .find(|c| c.filename == "06_personal.jpg")
        .unwrap();
    assert_eq!(short.word_count, 40);
    assert_eq!(short.required_words, 100);

    let missing = report
        .explanation_checks
        .iter()
        .find(|c| c.filename == "08_meme.png")
        .unwrap();
    assert!(missing.explanation_file.is_none());
    assert!(!missing.passed);
}

#[tokio::test]
async fn test_invalid_line_stops_scoring() {
    let mut storage = complete_storage();
    let manifest = format!("{}broken.jpg|ЛИЧНОЕ|2024-01-01\n", common::MANIFEST);
    storage.insert("manifest.txt", manifest.into_bytes());

    let inspection = inspector(storage).inspect().await.unwrap();

    assert!(inspection.report.is_none());
    assert_eq!(inspection.items.len(), 13);
    assert_eq!(inspection.errors.len(), 1);
    assert_eq!(inspection.errors[0].kind, ValidationErrorKind::FieldCount);
    assert!(!inspection.is_complete());
}

#[tokio::test]
async fn test_missing_and_extra_files() {
    let mut storage = without(complete_storage(), "02_news.pdf");
    storage.insert("notes.docx", b"draft".to_vec());

    let report = inspector(storage).inspect().await.unwrap().report.unwrap();
    assert_eq!(report.missing_files, vec!["02_news.pdf"]);
    assert_eq!(report.extra_files, vec!["notes.docx"]);
}

#[tokio::test]
async fn test_manifest_not_found() {
    let storage = MemoryStorage::new().with_file("01_news.pdf", b"%PDF".to_vec());
    let result = inspector(storage).inspect().await;
    match result {
        Err(CapsuleError::ManifestNotFound(names)) => {
            assert_eq!(names, vec!["manifest.txt", "манифест.txt"]);
        }
        other => panic!("expected ManifestNotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_custom_policy_and_manifest_name() {
    let storage = MemoryStorage::new()
        .with_file(
            "index.txt",
            "01.pdf | НОВОСТЬ | Заголовок | Описание | 2024-01-01 | a,b\n"
                .as_bytes()
                .to_vec(),
        )
        .with_file("01.pdf", b"%PDF".to_vec());

    let config = Config {
        manifest_names: vec!["INDEX.TXT".to_string()],
        policy: ScoringPolicy {
            news_required: 1,
            personal_required: 0,
            memes_required: 0,
            min_tags: 2,
            ..ScoringPolicy::default()
        },
        ..Config::default()
    };

    let inspection = inspector(storage).with_config(config).inspect().await.unwrap();
    let report = inspection.report.unwrap();

    assert_eq!(inspection.manifest_filename, "index.txt");
    assert!(report.news.passed);
    assert!(report.tags.passed);
    assert!(!report.capsule.passed);
    assert_eq!(report.required, 1 + 1 + 1);
    assert_eq!(report.achieved, 2);
}

/// Storage whose reads fail for one file.
struct FailingRead {
    inner: MemoryStorage,
    broken: &'static str,
}

#[async_trait]
impl ArchiveStorage for FailingRead {
    async fn list_files(&self) -> StorageResult<Vec<String>> {
        self.inner.list_files().await
    }

    async fn extract_bytes(&self, name: &str) -> StorageResult<Vec<u8>> {
        if name == self.broken {
            return Err(StorageError::Io(std::io::Error::other("disk on fire")));
        }
        self.inner.extract_bytes(name).await
    }
}

#[tokio::test]
async fn test_unreadable_explanation_fails_only_that_item() {
    let storage = FailingRead {
        inner: complete_storage(),
        broken: "09_meme_explanation.txt",
    };

    let report = inspector(storage).inspect().await.unwrap().report.unwrap();

    let failed = report
        .explanation_checks
        .iter()
        .find(|c| c.filename == "09_meme.png")
        .unwrap();
    assert!(!failed.passed);
    assert!(failed.error.as_deref().unwrap().contains("disk on fire"));
    assert_eq!(report.meme_explanations.achieved, 4);
    assert_eq!(report.percentage, 97);
}

/// Extractor returning canned metadata per filename.
struct CannedMetadata(HashMap<String, ExtractedMetadata>);

#[async_trait]
impl MetadataExtractor for CannedMetadata {
    async fn extract(
        &self,
        filename: &str,
        _bytes: &[u8],
    ) -> Result<Option<ExtractedMetadata>, MetadataError> {
        Ok(self.0.get(filename).cloned())
    }
}

#[tokio::test]
async fn test_pdf_metadata_fills_minimal_lines() {
    let storage = MemoryStorage::new()
        .with_file(
            "manifest.txt",
            "01.pdf | НОВОСТЬ | 2024-01-01\n".as_bytes().to_vec(),
        )
        .with_file("01.pdf", b"%PDF".to_vec());

    let extracted = ExtractedMetadata {
        title: Some("Из метаданных".to_string()),
        keywords: ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect(),
        ..ExtractedMetadata::default()
    };
    let extractor = CannedMetadata(HashMap::from([("01.pdf".to_string(), extracted)]));

    let without_metadata = inspector(storage.clone()).inspect().await.unwrap();
    assert!(!without_metadata.report.unwrap().tags.passed);

    let inspection = inspector(storage)
        .with_metadata(Box::new(extractor))
        .inspect()
        .await
        .unwrap();

    assert_eq!(inspection.items[0].title, "Из метаданных");
    assert_eq!(inspection.items[0].tags.len(), 5);
    assert!(inspection.report.unwrap().tags.passed);
}

fn without(mut storage: MemoryStorage, name: &str) -> MemoryStorage {
    storage.remove(name);
    storage
}
