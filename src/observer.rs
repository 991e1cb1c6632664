//! Observer hooks for inspection runs.
//!
//! The engine reports stage timing, rejected lines and per-item failures
//! through an injected [`InspectionObserver`]. [`TracingObserver`] forwards
//! everything to `tracing`; [`NoopObserver`] discards it.

use std::time::Duration;

use crate::models::ValidationError;

/// Stages of an inspection run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ManifestLookup,
    Parse,
    Metadata,
    Explanations,
    Scoring,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::ManifestLookup => "manifest_lookup",
            Stage::Parse => "parse",
            Stage::Metadata => "metadata",
            Stage::Explanations => "explanations",
            Stage::Scoring => "scoring",
        }
    }
}

/// Receives progress from an inspection run. Every hook defaults to a no-op.
pub trait InspectionObserver: Send + Sync {
    fn stage_started(&self, _stage: Stage) {}

    fn stage_finished(&self, _stage: Stage, _elapsed: Duration) {}

    /// A manifest line was rejected.
    fn line_rejected(&self, _error: &ValidationError) {}

    /// A per-item collaborator call failed; the run continues.
    fn item_failed(&self, _filename: &str, _reason: &str) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl InspectionObserver for NoopObserver {}

/// Observer that logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl InspectionObserver for TracingObserver {
    fn stage_started(&self, stage: Stage) {
        tracing::debug!("Stage {} started", stage.as_str());
    }

    fn stage_finished(&self, stage: Stage, elapsed: Duration) {
        tracing::info!("Stage {} finished in {:?}", stage.as_str(), elapsed);
    }

    fn line_rejected(&self, error: &ValidationError) {
        tracing::warn!(
            line = error.line_number,
            kind = ?error.kind,
            "Rejected manifest line: {}",
            error.message
        );
    }

    fn item_failed(&self, filename: &str, reason: &str) {
        tracing::warn!("Item {} failed: {}", filename, reason);
    }
}
