//! Explanation word-count checks.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{ArchiveItem, CategoryProgress, ExplanationCheck, TypeCategory};
use crate::observer::InspectionObserver;
use crate::scoring::ScoringPolicy;
use crate::storage::ArchiveStorage;

use super::locate_explanation;

/// Word-count verdicts for every personal and meme item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExplanationSummary {
    /// One check per personal/meme item, in item order.
    pub checks: Vec<ExplanationCheck>,
}

impl ExplanationSummary {
    fn progress(&self, category: TypeCategory) -> CategoryProgress {
        let relevant = self.checks.iter().filter(|c| c.category == category);
        let total = relevant.clone().count();
        let passing = relevant.filter(|c| c.passed).count();
        CategoryProgress::exactly(passing, total)
    }

    pub fn personal_progress(&self) -> CategoryProgress {
        self.progress(TypeCategory::Personal)
    }

    pub fn meme_progress(&self) -> CategoryProgress {
        self.progress(TypeCategory::Meme)
    }

    /// Explanation files that were found, lower-cased.
    pub fn resolved_files(&self) -> HashSet<String> {
        self.checks
            .iter()
            .filter_map(|c| c.explanation_file.as_ref())
            .map(|f| f.to_lowercase())
            .collect()
    }
}

/// Count whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Locate and word-count the explanation of every personal and meme item.
///
/// Reads run concurrently. A missing or unreadable explanation fails that item
/// only; read errors are kept on the check.
pub async fn validate_explanations(
    items: &[ArchiveItem],
    listing: &[String],
    storage: &dyn ArchiveStorage,
    policy: &ScoringPolicy,
    observer: &dyn InspectionObserver,
) -> ExplanationSummary {
    let checks = items
        .iter()
        .filter(|item| item.category().needs_explanation())
        .map(|item| check_item(item, listing, storage, policy, observer));

    ExplanationSummary {
        checks: futures::future::join_all(checks).await,
    }
}

async fn check_item(
    item: &ArchiveItem,
    listing: &[String],
    storage: &dyn ArchiveStorage,
    policy: &ScoringPolicy,
    observer: &dyn InspectionObserver,
) -> ExplanationCheck {
    let category = item.category();
    let required_words = policy.explanation_words(category);
    let mut check = ExplanationCheck {
        filename: item.filename.clone(),
        category,
        explanation_file: None,
        word_count: 0,
        required_words,
        passed: false,
        error: None,
    };

    let Some(explanation) = locate_explanation(&item.filename, listing) else {
        tracing::debug!("No explanation file for {}", item.filename);
        return check;
    };

    match storage.extract_text(&explanation).await {
        Ok(text) => {
            check.word_count = count_words(&text);
            check.passed = check.word_count >= required_words;
        }
        Err(e) => {
            observer.item_failed(&item.filename, &e.to_string());
            check.error = Some(e.to_string());
        }
    }
    check.explanation_file = Some(explanation);

    check
}
