//! Archive item model produced by the manifest parser.

use serde::{Deserialize, Serialize};

/// Declared type string for news items.
pub const NEWS_TYPE: &str = "НОВОСТЬ";

/// Item category as far as manifest layout and explanation rules care.
///
/// Anything that is not a capsule, personal or meme entry (news included)
/// shares the generic layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    Capsule,
    Personal,
    Meme,
    Generic,
}

impl TypeCategory {
    /// Classify a declared type, case-insensitively after trimming.
    pub fn from_type(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "КАПСУЛА" => Self::Capsule,
            "ЛИЧНОЕ" => Self::Personal,
            "МЕМ" => Self::Meme,
            _ => Self::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Capsule => "capsule",
            Self::Personal => "personal",
            Self::Meme => "meme",
            Self::Generic => "generic",
        }
    }

    /// Whether items of this category need a companion explanation file.
    pub fn needs_explanation(&self) -> bool {
        matches!(self, Self::Personal | Self::Meme)
    }
}

/// File class as far as manifest layout cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileClass {
    Pdf,
    Other,
}

impl FileClass {
    /// Classify a filename by its `.pdf` extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Self {
        if filename.to_lowercase().ends_with(".pdf") {
            Self::Pdf
        } else {
            Self::Other
        }
    }
}

/// One successfully parsed manifest entry.
///
/// `filename` and `item_type` are never empty and `date` always has an
/// accepted shape. Text fields hold display-safe (escaped) values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveItem {
    /// File name inside the archive.
    pub filename: String,
    /// Declared type as written in the manifest.
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: String,
    pub date: String,
    /// Tags in manifest order; duplicates are kept.
    pub tags: Vec<String>,
    /// Author, only ever set on capsule items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ArchiveItem {
    pub fn category(&self) -> TypeCategory {
        TypeCategory::from_type(&self.item_type)
    }

    pub fn file_class(&self) -> FileClass {
        FileClass::from_filename(&self.filename)
    }

    pub fn is_capsule(&self) -> bool {
        self.category() == TypeCategory::Capsule
    }

    pub fn is_news(&self) -> bool {
        self.item_type.trim().to_uppercase() == NEWS_TYPE
    }

    pub fn is_pdf(&self) -> bool {
        self.file_class() == FileClass::Pdf
    }

    /// Whether `tag` is already present, compared trimmed and case-insensitively.
    pub fn has_tag(&self, tag: &str) -> bool {
        let needle = tag.trim().to_lowercase();
        self.tags.iter().any(|t| t.trim().to_lowercase() == needle)
    }
}
