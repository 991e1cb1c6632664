//! Manifest layouts and how a line picks one.
//!
//! A line's layout depends on its file class (PDF or not), its declared type
//! category and how many pipe-separated fields it has. The pair of class and
//! category narrows the candidates with an exhaustive match; the field count
//! then picks one candidate or none.

use serde::Serialize;

use crate::models::{FieldName, FileClass, TypeCategory};

/// Fewer fields than this never match any layout.
pub const MIN_FIELDS: usize = 3;

/// Fixed field layouts a manifest line can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    /// `filename | type | date | author`
    Capsule,
    /// `filename | type | date | title | tags`
    Titled,
    /// `filename | type | title | description | date | tags`, extra fields ignored.
    Full,
    /// `filename | type | date`, the rest comes from embedded PDF metadata.
    PdfMinimal,
    /// `filename | type | date | tags`
    PdfLegacyTags,
}

impl SchemaVariant {
    /// Field order of this layout.
    pub fn fields(&self) -> &'static [FieldName] {
        use FieldName::*;
        match self {
            Self::Capsule => &[Filename, Type, Date, Author],
            Self::Titled => &[Filename, Type, Date, Title, Tags],
            Self::Full => &[Filename, Type, Title, Description, Date, Tags],
            Self::PdfMinimal => &[Filename, Type, Date],
            Self::PdfLegacyTags => &[Filename, Type, Date, Tags],
        }
    }

    pub fn expected_count(&self) -> usize {
        self.fields().len()
    }

    /// Whether fields beyond the layout are tolerated (and ignored).
    pub fn is_open_ended(&self) -> bool {
        matches!(self, Self::Full)
    }

    pub fn accepts(&self, field_count: usize) -> bool {
        if self.is_open_ended() {
            field_count >= self.expected_count()
        } else {
            field_count == self.expected_count()
        }
    }

    /// Role of the field at `index`; positions past the layout are `Unexpected`.
    pub fn field_at(&self, index: usize) -> FieldName {
        self.fields()
            .get(index)
            .copied()
            .unwrap_or(FieldName::Unexpected)
    }

    pub fn index_of(&self, field: FieldName) -> Option<usize> {
        self.fields().iter().position(|f| *f == field)
    }

    /// Field order rendered as `a | b | c`.
    pub fn hint(&self) -> String {
        let mut hint = self
            .fields()
            .iter()
            .map(FieldName::as_str)
            .collect::<Vec<_>>()
            .join(" | ");
        if self.is_open_ended() {
            hint.push_str(" [| ...]");
        }
        hint
    }
}

/// Layouts allowed for a file class and type category, in preference order.
pub fn candidates(file_class: FileClass, category: TypeCategory) -> &'static [SchemaVariant] {
    use SchemaVariant::*;
    match (file_class, category) {
        (FileClass::Other, TypeCategory::Capsule) => &[Capsule],
        (FileClass::Other, TypeCategory::Personal | TypeCategory::Meme) => &[Titled],
        (FileClass::Other, TypeCategory::Generic) => &[Full],
        (FileClass::Pdf, TypeCategory::Personal | TypeCategory::Meme) => &[Titled],
        // PDF capsules have no layout of their own and follow the generic PDF rows.
        (FileClass::Pdf, TypeCategory::Generic | TypeCategory::Capsule) => {
            &[PdfMinimal, PdfLegacyTags, Full]
        }
    }
}

/// Pick the layout for a line, or `None` when the field count fits none.
pub fn resolve(
    file_class: FileClass,
    category: TypeCategory,
    field_count: usize,
) -> Option<SchemaVariant> {
    candidates(file_class, category)
        .iter()
        .copied()
        .find(|variant| variant.accepts(field_count))
}

/// Closest layout for naming fields of a line that matched nothing.
///
/// Prefers the first candidate that could still be completed by adding
/// fields; otherwise the largest one.
pub fn best_guess(
    file_class: FileClass,
    category: TypeCategory,
    field_count: usize,
) -> SchemaVariant {
    let options = candidates(file_class, category);
    options
        .iter()
        .copied()
        .find(|variant| variant.expected_count() >= field_count)
        .unwrap_or(options[options.len() - 1])
}

/// Expected field orders for a class and category, joined for an error hint.
pub fn expected_hint(file_class: FileClass, category: TypeCategory) -> String {
    candidates(file_class, category)
        .iter()
        .map(SchemaVariant::hint)
        .collect::<Vec<_>>()
        .join(" or ")
}
