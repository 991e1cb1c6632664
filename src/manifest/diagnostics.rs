//! Per-field breakdown for rejected manifest lines.

use crate::models::{FieldName, ProblematicPart};
use crate::utils::{dates::accepted_date_shapes, is_valid_date, sanitize_filename};

use super::schema::SchemaVariant;

/// Why a field value fails its role, or `None` when it is acceptable.
///
/// Tags are never flagged: an empty tag list is the scorer's concern.
pub(crate) fn field_problem(field: FieldName, raw: &str) -> Option<String> {
    match field {
        FieldName::Filename if sanitize_filename(raw).is_empty() => {
            Some("filename is empty or contains a path traversal sequence".to_string())
        }
        FieldName::Type if raw.is_empty() => Some("type is empty".to_string()),
        FieldName::Date if !is_valid_date(raw) => Some(format!(
            "date {:?} must look like {}",
            raw,
            accepted_date_shapes().join(", ")
        )),
        FieldName::Author if raw.is_empty() => {
            Some("author is required for capsule items".to_string())
        }
        _ => None,
    }
}

/// Describe every supplied field under `variant` and synthesize entries for
/// the fields the line is missing.
///
/// With `flag_all`, every supplied field is marked problematic regardless of
/// its content (used when the separators themselves are broken).
pub(crate) fn describe_parts(
    parts: &[String],
    variant: SchemaVariant,
    flag_all: bool,
) -> Vec<ProblematicPart> {
    let expected = variant.expected_count();

    let mut described: Vec<ProblematicPart> = parts
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let field_name = variant.field_at(index);
            let is_within_expected_count = index < expected || variant.is_open_ended();
            let is_problematic = flag_all
                || !is_within_expected_count
                || field_problem(field_name, raw).is_some();
            ProblematicPart {
                index,
                raw_text: raw.clone(),
                field_name,
                is_empty: raw.is_empty(),
                is_problematic,
                is_within_expected_count,
                is_missing: false,
            }
        })
        .collect();

    for index in parts.len()..expected {
        described.push(ProblematicPart {
            index,
            raw_text: String::new(),
            field_name: variant.field_at(index),
            is_empty: true,
            is_problematic: true,
            is_within_expected_count: true,
            is_missing: true,
        });
    }

    described
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_field_problem_rules() {
        assert!(field_problem(FieldName::Filename, "").is_some());
        assert!(field_problem(FieldName::Filename, "../x.png").is_some());
        assert!(field_problem(FieldName::Filename, "x.png").is_none());
        assert!(field_problem(FieldName::Type, "").is_some());
        assert!(field_problem(FieldName::Date, "yesterday").is_some());
        assert!(field_problem(FieldName::Date, "2024-01-01").is_none());
        assert!(field_problem(FieldName::Author, "").is_some());
        assert!(field_problem(FieldName::Tags, "").is_none());
        assert!(field_problem(FieldName::Title, "").is_none());
    }

    #[test]
    fn test_describe_synthesizes_missing() {
        let described = describe_parts(
            &parts(&["a.jpg", "НОВОСТЬ", "Заголовок"]),
            SchemaVariant::Full,
            false,
        );
        assert_eq!(described.len(), 6);
        let missing: Vec<_> = described.iter().filter(|p| p.is_missing).collect();
        assert_eq!(missing.len(), 3);
        assert_eq!(
            missing.iter().map(|p| p.index).collect::<Vec<_>>(),
            vec![3, 4, 5]
        );
        assert!(missing.iter().all(|p| p.is_empty && p.is_problematic));
        assert_eq!(described[2].field_name, FieldName::Title);
        assert!(!described[2].is_problematic);
    }

    #[test]
    fn test_describe_marks_overflow() {
        let described = describe_parts(
            &parts(&["c.txt", "КАПСУЛА", "2024-01-01", "Автор", "лишнее"]),
            SchemaVariant::Capsule,
            false,
        );
        assert_eq!(described.len(), 5);
        assert_eq!(described[4].field_name, FieldName::Unexpected);
        assert!(!described[4].is_within_expected_count);
        assert!(described[4].is_problematic);
        assert!(!described[3].is_problematic);
    }

    #[test]
    fn test_describe_flag_all() {
        let described = describe_parts(
            &parts(&["a.jpg", "МЕМ", "2024-01-01", "t", "x"]),
            SchemaVariant::Titled,
            true,
        );
        assert!(described.iter().all(|p| p.is_problematic));
    }

    #[test]
    fn test_describe_open_ended_extras_are_within_count() {
        let described = describe_parts(
            &parts(&["a.jpg", "НОВОСТЬ", "t", "d", "2024-01-01", "x", "more"]),
            SchemaVariant::Full,
            false,
        );
        assert_eq!(described[6].field_name, FieldName::Unexpected);
        assert!(described[6].is_within_expected_count);
        assert!(!described[6].is_problematic);
    }
}
