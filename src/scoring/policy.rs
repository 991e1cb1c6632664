//! Thresholds a capsule is scored against.

use serde::{Deserialize, Serialize};

use crate::models::TypeCategory;

/// Category and per-item thresholds. Defaults are the standard capsule policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// News items needed for full credit.
    pub news_required: usize,
    /// Personal items needed for full credit.
    pub personal_required: usize,
    /// Meme items needed for full credit.
    pub memes_required: usize,
    /// Tags each non-capsule item needs.
    pub min_tags: usize,
    /// Explanation words for personal items.
    pub personal_explanation_words: usize,
    /// Explanation words for meme items.
    pub meme_explanation_words: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            news_required: 5,
            personal_required: 2,
            memes_required: 5,
            min_tags: 5,
            personal_explanation_words: 100,
            meme_explanation_words: 50,
        }
    }
}

impl ScoringPolicy {
    /// Explanation words required for a category; zero where none is needed.
    pub fn explanation_words(&self, category: TypeCategory) -> usize {
        match category {
            TypeCategory::Personal => self.personal_explanation_words,
            TypeCategory::Meme => self.meme_explanation_words,
            TypeCategory::Capsule | TypeCategory::Generic => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let policy: ScoringPolicy = toml::from_str("news_required = 3").unwrap();
        assert_eq!(policy.news_required, 3);
        assert_eq!(policy.memes_required, 5);
        assert_eq!(policy.meme_explanation_words, 50);
    }

    #[test]
    fn test_explanation_words() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.explanation_words(TypeCategory::Personal), 100);
        assert_eq!(policy.explanation_words(TypeCategory::Meme), 50);
        assert_eq!(policy.explanation_words(TypeCategory::Generic), 0);
    }
}
