//! Completion report produced by the scorer.

use serde::Serialize;

use super::TypeCategory;

/// Achieved vs. required count for one scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub achieved: usize,
    pub required: usize,
    pub passed: bool,
}

impl CategoryProgress {
    /// Progress that passes once `achieved` reaches `required`.
    pub fn at_least(achieved: usize, required: usize) -> Self {
        Self {
            achieved,
            required,
            passed: achieved >= required,
        }
    }

    /// Progress that passes only when `achieved` equals `required`.
    pub fn exactly(achieved: usize, required: usize) -> Self {
        Self {
            achieved,
            required,
            passed: achieved == required,
        }
    }
}

/// Tag sufficiency verdict for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCheck {
    pub filename: String,
    pub tag_count: usize,
    pub required: usize,
    /// Capsule items pass without tags.
    pub exempt: bool,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Explanation word-count verdict for one personal or meme item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplanationCheck {
    pub filename: String,
    pub category: TypeCategory,
    pub explanation_file: Option<String>,
    pub word_count: usize,
    pub required_words: usize,
    pub passed: bool,
    /// Read failure from storage, kept for diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate readiness of a capsule archive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionReport {
    pub news: CategoryProgress,
    pub personal: CategoryProgress,
    pub memes: CategoryProgress,
    pub capsule: CategoryProgress,
    pub tags: CategoryProgress,
    pub personal_explanations: CategoryProgress,
    pub meme_explanations: CategoryProgress,
    pub tag_checks: Vec<TagCheck>,
    pub explanation_checks: Vec<ExplanationCheck>,
    /// Archive files the manifest does not mention.
    pub extra_files: Vec<String>,
    /// Manifest files absent from the archive.
    pub missing_files: Vec<String>,
    pub achieved: usize,
    pub required: usize,
    pub percentage: u32,
}

impl CompletionReport {
    /// Every category passed.
    pub fn is_complete(&self) -> bool {
        self.categories().iter().all(|(_, progress)| progress.passed)
    }

    /// Categories in display order.
    pub fn categories(&self) -> [(&'static str, CategoryProgress); 7] {
        [
            ("news", self.news),
            ("personal", self.personal),
            ("memes", self.memes),
            ("capsule", self.capsule),
            ("tags", self.tags),
            ("personal_explanations", self.personal_explanations),
            ("meme_explanations", self.meme_explanations),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_progress_thresholds() {
        assert!(CategoryProgress::at_least(7, 5).passed);
        assert!(!CategoryProgress::at_least(4, 5).passed);
        assert!(CategoryProgress::exactly(1, 1).passed);
        assert!(!CategoryProgress::exactly(2, 1).passed);
        assert!(!CategoryProgress::exactly(0, 1).passed);
    }
}
