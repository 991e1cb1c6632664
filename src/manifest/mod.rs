//! Manifest parsing: pipe-delimited lines into archive items.
//!
//! Blank lines and lines starting with `#` are skipped but still counted, so
//! reported line numbers match the file as written. Every other line either
//! yields an [`ArchiveItem`] or a [`ValidationError`]; parsing never fails as
//! a whole.

mod diagnostics;
mod line;
pub mod schema;

pub use line::{parse_line, parse_tags};
pub use schema::SchemaVariant;

use serde::Serialize;

use crate::models::{ArchiveItem, ValidationError};
use crate::observer::{InspectionObserver, NoopObserver};

/// Outcome of parsing a whole manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedManifest {
    /// Items in manifest order.
    pub items: Vec<ArchiveItem>,
    /// Errors in manifest order.
    pub errors: Vec<ValidationError>,
}

impl ParsedManifest {
    /// True when no line was rejected.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Filenames of all parsed items, in manifest order.
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.filename.as_str())
    }
}

/// Parse manifest text into items and errors.
pub fn parse_manifest(text: &str) -> ParsedManifest {
    parse_manifest_observed(text, &NoopObserver)
}

/// Parse manifest text, reporting each rejected line to `observer`.
pub fn parse_manifest_observed(text: &str, observer: &dyn InspectionObserver) -> ParsedManifest {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut parsed = ParsedManifest::default();

    for (idx, raw) in text.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line_number, line) {
            Ok(item) => {
                tracing::debug!("Line {}: parsed {}", line_number, item.filename);
                parsed.items.push(item);
            }
            Err(error) => {
                observer.line_rejected(&error);
                parsed.errors.push(error);
            }
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationErrorKind;

    #[test]
    fn test_comments_and_blanks_only() {
        let parsed = parse_manifest("# header\n\n   \n# another comment\n");
        assert!(parsed.items.is_empty());
        assert!(parsed.errors.is_empty());
        assert!(parsed.is_valid());
    }

    #[test]
    fn test_line_numbers_count_skipped_lines() {
        let text = "# Манифест\n\n01.pdf | НОВОСТЬ | 2024-10-20\n# comment\nbad line\n";
        let parsed = parse_manifest(text);
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].line_number, 5);
        assert_eq!(parsed.errors[0].kind, ValidationErrorKind::InsufficientFields);
    }

    #[test]
    fn test_order_preserved_and_all_lines_reported() {
        let text = "b.pdf | НОВОСТЬ | 2024-10-20\n\
                    x | y\n\
                    a.pdf | НОВОСТЬ | 2024-10-21\n\
                    z.jpg|ЛИЧНОЕ|2024-01-01\n";
        let parsed = parse_manifest(text);
        assert_eq!(parsed.filenames().collect::<Vec<_>>(), vec!["b.pdf", "a.pdf"]);
        assert_eq!(
            parsed.errors.iter().map(|e| e.line_number).collect::<Vec<_>>(),
            vec![2, 4]
        );
    }

    #[test]
    fn test_crlf_and_bom() {
        let text = "\u{feff}# header\r\n01.pdf | НОВОСТЬ | 2024-10-20\r\n";
        let parsed = parse_manifest(text);
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].date, "2024-10-20");
    }

    #[test]
    fn test_every_line_failing_still_returns() {
        let parsed = parse_manifest("a\nb | c\n|||\n");
        assert!(parsed.items.is_empty());
        assert_eq!(parsed.errors.len(), 3);
    }
}
