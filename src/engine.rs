//! The inspection pipeline: manifest lookup, parsing, metadata merge,
//! explanation checks and scoring.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::config::Config;
use crate::error::CapsuleError;
use crate::explanation::validate_explanations;
use crate::manifest::parse_manifest_observed;
use crate::metadata::{collect_metadata, merge_metadata, MetadataExtractor};
use crate::models::{ArchiveItem, CompletionReport, ValidationError};
use crate::observer::{InspectionObserver, Stage, TracingObserver};
use crate::scoring::score_archive;
use crate::storage::ArchiveStorage;

/// Result of inspecting one capsule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    /// Archive entry the manifest was read from.
    pub manifest_filename: String,
    /// Parsed items, after metadata merge when a report was produced.
    pub items: Vec<ArchiveItem>,
    /// Rejected manifest lines.
    pub errors: Vec<ValidationError>,
    /// Completion report; absent when the manifest has errors.
    pub report: Option<CompletionReport>,
}

impl Inspection {
    /// True when the manifest parsed cleanly and every requirement is met.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
            && self
                .report
                .as_ref()
                .is_some_and(CompletionReport::is_complete)
    }
}

/// Inspects a capsule held in an [`ArchiveStorage`].
pub struct CapsuleInspector {
    storage: Box<dyn ArchiveStorage>,
    metadata: Option<Box<dyn MetadataExtractor>>,
    observer: Arc<dyn InspectionObserver>,
    config: Config,
}

impl CapsuleInspector {
    pub fn new(storage: Box<dyn ArchiveStorage>) -> Self {
        Self {
            storage,
            metadata: None,
            observer: Arc::new(TracingObserver),
            config: Config::default(),
        }
    }

    /// Enrich PDF and image items from embedded metadata before scoring.
    pub fn with_metadata(mut self, extractor: Box<dyn MetadataExtractor>) -> Self {
        self.metadata = Some(extractor);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn InspectionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a full inspection.
    ///
    /// Only a missing or unreadable manifest is an error. Rejected lines are
    /// returned on the [`Inspection`] and skip scoring; per-item read failures
    /// fail that item's check.
    pub async fn inspect(&self) -> Result<Inspection, CapsuleError> {
        let observer = self.observer.as_ref();

        let started = self.begin(Stage::ManifestLookup);
        let listing = self.storage.list_files().await?;
        let manifest_filename = self
            .config
            .find_manifest(&listing)
            .cloned()
            .ok_or_else(|| CapsuleError::ManifestNotFound(self.config.manifest_names.clone()))?;
        let text = self.storage.extract_text(&manifest_filename).await?;
        self.finish(Stage::ManifestLookup, started);

        let started = self.begin(Stage::Parse);
        let parsed = parse_manifest_observed(&text, observer);
        self.finish(Stage::Parse, started);

        if !parsed.is_valid() {
            tracing::info!(
                "{} has {} invalid lines; skipping scoring",
                manifest_filename,
                parsed.errors.len()
            );
            return Ok(Inspection {
                manifest_filename,
                items: parsed.items,
                errors: parsed.errors,
                report: None,
            });
        }

        let items = match &self.metadata {
            Some(extractor) => {
                let started = self.begin(Stage::Metadata);
                let found =
                    collect_metadata(&parsed.items, self.storage.as_ref(), extractor.as_ref(), observer)
                        .await;
                self.finish(Stage::Metadata, started);
                merge_metadata(&parsed.items, &found)
            }
            None => parsed.items,
        };

        let started = self.begin(Stage::Explanations);
        let explanations = validate_explanations(
            &items,
            &listing,
            self.storage.as_ref(),
            &self.config.policy,
            observer,
        )
        .await;
        self.finish(Stage::Explanations, started);

        let started = self.begin(Stage::Scoring);
        let report = score_archive(
            &items,
            &listing,
            &explanations,
            Some(&manifest_filename),
            &self.config.policy,
        );
        self.finish(Stage::Scoring, started);

        Ok(Inspection {
            manifest_filename,
            items,
            errors: Vec::new(),
            report: Some(report),
        })
    }

    fn begin(&self, stage: Stage) -> Instant {
        self.observer.stage_started(stage);
        Instant::now()
    }

    fn finish(&self, stage: Stage, started: Instant) {
        self.observer.stage_finished(stage, started.elapsed());
    }
}
