//! Single manifest line parsing.

use crate::models::{
    ArchiveItem, FieldName, FileClass, TypeCategory, ValidationError, ValidationErrorKind,
};
use crate::utils::{sanitize_filename, sanitize_text};

use super::diagnostics::{describe_parts, field_problem};
use super::schema::{self, SchemaVariant, MIN_FIELDS};

/// Parse one non-empty, non-comment manifest line.
///
/// `line_number` is one-based and only used for reporting.
pub fn parse_line(line_number: usize, raw: &str) -> Result<ArchiveItem, ValidationError> {
    let parts = split_fields(raw);
    let (file_class, category) = classify(&parts);

    if has_malformed_separators(raw, parts.len()) {
        let variant = schema::best_guess(file_class, category, parts.len());
        return Err(ValidationError {
            line_number,
            raw_line: raw.to_string(),
            kind: ValidationErrorKind::Delimiter,
            message: "Malformed separators: use \" | \" between fields and do not leave empty fields between pipes".to_string(),
            expected_format_hint: schema::expected_hint(file_class, category),
            problematic_parts: describe_parts(&parts, variant, true),
        });
    }

    if parts.len() < MIN_FIELDS {
        let variant = schema::best_guess(file_class, category, parts.len());
        return Err(ValidationError {
            line_number,
            raw_line: raw.to_string(),
            kind: ValidationErrorKind::InsufficientFields,
            message: format!(
                "Insufficient fields: found {}, at least {} required",
                parts.len(),
                MIN_FIELDS
            ),
            expected_format_hint: schema::expected_hint(file_class, category),
            problematic_parts: describe_parts(&parts, variant, false),
        });
    }

    let Some(variant) = schema::resolve(file_class, category, parts.len()) else {
        let variant = schema::best_guess(file_class, category, parts.len());
        let hint = schema::expected_hint(file_class, category);
        return Err(ValidationError {
            line_number,
            raw_line: raw.to_string(),
            kind: ValidationErrorKind::FieldCount,
            message: format!(
                "Wrong number of fields for {} {} item: found {}, expected {}",
                file_class_label(file_class),
                category.as_str(),
                parts.len(),
                hint
            ),
            expected_format_hint: hint,
            problematic_parts: describe_parts(&parts, variant, false),
        });
    };

    let problems: Vec<String> = variant
        .fields()
        .iter()
        .zip(parts.iter())
        .filter_map(|(field, value)| field_problem(*field, value))
        .collect();

    if !problems.is_empty() {
        return Err(ValidationError {
            line_number,
            raw_line: raw.to_string(),
            kind: ValidationErrorKind::InvalidFields,
            message: format!("Invalid fields: {}", problems.join("; ")),
            expected_format_hint: variant.hint(),
            problematic_parts: describe_parts(&parts, variant, false),
        });
    }

    Ok(build_item(variant, &parts))
}

/// Split a line on `|` and trim every field.
pub(crate) fn split_fields(raw: &str) -> Vec<String> {
    raw.split('|').map(|p| p.trim().to_string()).collect()
}

/// Split a comma-separated tag field, dropping empty entries.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(sanitize_text)
        .collect()
}

/// Detect pipes that are not consistently surrounded by spaces and hide
/// empty fields.
///
/// Only lines missing either `"| "` or `" |"` are checked. Such a line is
/// rewritten with every pipe padded to `" | "` and re-split dropping empty
/// segments; a different field count means doubled, leading or trailing
/// pipes.
fn has_malformed_separators(raw: &str, field_count: usize) -> bool {
    let separators = raw.matches('|').count();
    if separators == 0 || (raw.contains("| ") && raw.contains(" |")) {
        return false;
    }

    let normalized = raw.replace('|', " | ");
    let renormalized_count = normalized
        .split('|')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .count();

    renormalized_count != field_count
}

/// File class from the first field, type category from the second.
fn classify(parts: &[String]) -> (FileClass, TypeCategory) {
    let file_class = parts
        .first()
        .map(|f| FileClass::from_filename(f))
        .unwrap_or(FileClass::Other);
    let category = parts
        .get(1)
        .map(|t| TypeCategory::from_type(&sanitize_text(t)))
        .unwrap_or(TypeCategory::Generic);
    (file_class, category)
}

fn file_class_label(file_class: FileClass) -> &'static str {
    match file_class {
        FileClass::Pdf => "PDF",
        FileClass::Other => "non-PDF",
    }
}

/// Value of `name` under `variant`, or `""` when the layout lacks it.
fn field_value<'a>(variant: SchemaVariant, parts: &'a [String], name: FieldName) -> &'a str {
    variant
        .index_of(name)
        .and_then(|idx| parts.get(idx))
        .map(String::as_str)
        .unwrap_or("")
}

fn build_item(variant: SchemaVariant, parts: &[String]) -> ArchiveItem {
    let field = |name: FieldName| field_value(variant, parts, name);

    ArchiveItem {
        filename: sanitize_filename(field(FieldName::Filename)),
        item_type: sanitize_text(field(FieldName::Type)),
        title: sanitize_text(field(FieldName::Title)),
        description: sanitize_text(field(FieldName::Description)),
        date: field(FieldName::Date).to_string(),
        tags: parse_tags(field(FieldName::Tags)),
        author: variant
            .index_of(FieldName::Author)
            .map(|_| sanitize_text(field(FieldName::Author))),
    }
}
