//! Capsule inspection: manifest parsing and archive validation.
//!
//! A capsule is an archive of news clippings, personal items and memes plus a
//! pipe-delimited manifest describing each file. This crate parses the
//! manifest against the layouts each file kind allows, reports exactly which
//! fields of a bad line are wrong, and scores a well-formed capsule against
//! its completion policy.

pub mod config;
pub mod engine;
pub mod error;
pub mod explanation;
pub mod manifest;
pub mod metadata;
pub mod models;
pub mod observer;
pub mod scoring;
pub mod storage;
pub mod utils;

pub use config::{Config, ConfigError};
pub use engine::{CapsuleInspector, Inspection};
pub use error::CapsuleError;
pub use manifest::{parse_line, parse_manifest, ParsedManifest};
pub use models::{ArchiveItem, CompletionReport, ValidationError};
pub use observer::{InspectionObserver, NoopObserver, TracingObserver};
pub use scoring::{score_archive, ScoringPolicy};
pub use storage::{open_storage, ArchiveStorage, StorageError};
