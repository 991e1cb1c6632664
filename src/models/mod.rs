//! Data models for capsule manifests and completion reports.

mod item;
mod report;
mod validation;

pub use item::{ArchiveItem, FileClass, TypeCategory, NEWS_TYPE};
pub use report::{CategoryProgress, CompletionReport, ExplanationCheck, TagCheck};
pub use validation::{
    ErrorCategory, FieldName, ProblematicPart, ValidationError, ValidationErrorKind,
};
