//! Structured manifest validation errors.

use serde::Serialize;

/// Positional role of a manifest field under a schema variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Filename,
    Type,
    Date,
    Author,
    Title,
    Description,
    Tags,
    /// A field beyond what the layout expects.
    Unexpected,
}

impl FieldName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filename => "filename",
            Self::Type => "type",
            Self::Date => "date",
            Self::Author => "author",
            Self::Title => "title",
            Self::Description => "description",
            Self::Tags => "tags",
            Self::Unexpected => "unexpected",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field breakdown attached to a validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblematicPart {
    /// Zero-based field position.
    pub index: usize,
    /// Trimmed field text as written (empty for synthesized entries).
    pub raw_text: String,
    pub field_name: FieldName,
    pub is_empty: bool,
    pub is_problematic: bool,
    pub is_within_expected_count: bool,
    /// Synthesized for a field the line did not supply.
    pub is_missing: bool,
}

/// What went wrong with a manifest line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Pipes are not separated consistently.
    Delimiter,
    /// Fewer fields than any layout accepts.
    InsufficientFields,
    /// Field count matches no layout for the file class and type.
    FieldCount,
    /// A layout matched but one or more fields failed their checks.
    InvalidFields,
}

/// Coarse error taxonomy exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Format,
    Delimiter,
}

impl ValidationErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Delimiter => ErrorCategory::Delimiter,
            Self::InsufficientFields | Self::FieldCount | Self::InvalidFields => {
                ErrorCategory::Format
            }
        }
    }
}

/// A manifest line that could not be turned into an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// One-based line number in the manifest file, blank and comment lines included.
    pub line_number: usize,
    pub raw_line: String,
    pub kind: ValidationErrorKind,
    pub message: String,
    /// Expected field order, e.g. `filename | type | date | author`.
    pub expected_format_hint: String,
    pub problematic_parts: Vec<ProblematicPart>,
}

impl ValidationError {
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Parts flagged as problematic, synthesized ones included.
    pub fn problems(&self) -> impl Iterator<Item = &ProblematicPart> {
        self.problematic_parts.iter().filter(|p| p.is_problematic)
    }

    /// Parts synthesized for fields the line did not supply.
    pub fn missing_parts(&self) -> impl Iterator<Item = &ProblematicPart> {
        self.problematic_parts.iter().filter(|p| p.is_missing)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.message)
    }
}
