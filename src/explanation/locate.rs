//! Explanation file discovery.
//!
//! Search order for an item `05_мем.png` (base name `05_мем`), first hit wins:
//! 1. `05_мем` + each known suffix, exact match against the listing
//! 2. progressively shorter `_`-separated prefixes of the base name (`05`)
//! 3. any listed explanation file whose stem contains the base name, or whose
//!    stem the base name contains

use std::collections::HashSet;

use serde::Serialize;

/// Suffix words marking an explanation file, in preference order.
pub const EXPLANATION_SUFFIXES: [&str; 5] = [
    "_объяснение",
    "_explanation",
    "_info",
    "_description",
    "_details",
];

const EXTENSIONS: [&str; 2] = [".txt", ".TXT"];

/// Which search tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Prefix,
    Fuzzy,
}

/// Find the explanation file for `filename` in the archive listing.
pub fn locate_explanation(filename: &str, listing: &[String]) -> Option<String> {
    locate_explanation_with_tier(filename, listing).map(|(file, _)| file)
}

/// Like [`locate_explanation`], also reporting which tier matched.
pub fn locate_explanation_with_tier(
    filename: &str,
    listing: &[String],
) -> Option<(String, MatchTier)> {
    let base = base_name(filename);
    if base.is_empty() {
        return None;
    }
    let names: HashSet<&str> = listing.iter().map(String::as_str).collect();

    if let Some(found) = with_suffixes(base, &names) {
        return Some((found, MatchTier::Exact));
    }

    let segments: Vec<&str> = base.split('_').collect();
    for len in (1..=segments.len()).rev() {
        let partial = segments[..len].join("_");
        if partial.is_empty() {
            continue;
        }
        if let Some(found) = with_suffixes(&partial, &names) {
            return Some((found, MatchTier::Prefix));
        }
    }

    listing
        .iter()
        .find(|candidate| {
            explanation_stem(candidate)
                .is_some_and(|stem| stem.contains(base) || base.contains(stem))
        })
        .map(|found| (found.clone(), MatchTier::Fuzzy))
}

/// Filename without its last extension.
fn base_name(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    }
}

fn with_suffixes(stem: &str, names: &HashSet<&str>) -> Option<String> {
    EXPLANATION_SUFFIXES.iter().find_map(|suffix| {
        EXTENSIONS.iter().find_map(|ext| {
            let candidate = format!("{}{}{}", stem, suffix, ext);
            names.contains(candidate.as_str()).then_some(candidate)
        })
    })
}

/// Stem of a listed explanation file with its suffix removed, if non-empty.
fn explanation_stem(name: &str) -> Option<&str> {
    EXPLANATION_SUFFIXES.iter().find_map(|suffix| {
        EXTENSIONS.iter().find_map(|ext| {
            name.strip_suffix(*ext)
                .and_then(|rest| rest.strip_suffix(*suffix))
                .filter(|stem| !stem.is_empty())
        })
    })
}
