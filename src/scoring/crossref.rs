//! Manifest vs. archive listing cross-reference.

use std::collections::HashSet;

use crate::models::ArchiveItem;

/// Files present on one side only. Comparisons ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReference {
    /// Archive files the manifest does not mention, in listing order.
    pub extra_files: Vec<String>,
    /// Manifest files missing from the archive, in manifest order.
    pub missing_files: Vec<String>,
}

/// Compare manifest filenames with the archive listing.
///
/// The manifest file itself and resolved explanation files
/// (`explanation_files`, lower-cased) never count as extra.
pub fn cross_reference(
    items: &[ArchiveItem],
    listing: &[String],
    manifest_filename: Option<&str>,
    explanation_files: &HashSet<String>,
) -> CrossReference {
    let manifest_names: HashSet<String> =
        items.iter().map(|item| item.filename.to_lowercase()).collect();
    let archive_names: HashSet<String> = listing.iter().map(|f| f.to_lowercase()).collect();
    let manifest_file = manifest_filename.map(str::to_lowercase);

    let extra_files = listing
        .iter()
        .filter(|file| {
            let lower = file.to_lowercase();
            !manifest_names.contains(&lower)
                && manifest_file.as_deref() != Some(lower.as_str())
                && !explanation_files.contains(&lower)
        })
        .cloned()
        .collect();

    let mut seen = HashSet::new();
    let missing_files = items
        .iter()
        .filter(|item| {
            let lower = item.filename.to_lowercase();
            !archive_names.contains(&lower) && seen.insert(lower)
        })
        .map(|item| item.filename.clone())
        .collect();

    CrossReference {
        extra_files,
        missing_files,
    }
}
