//! Explanation files for personal and meme items.
//!
//! Personal and meme entries need a companion text file with a long-form
//! description, found by naming convention rather than listed in the
//! manifest.

mod locate;
mod validate;

pub use locate::{locate_explanation, locate_explanation_with_tier, MatchTier, EXPLANATION_SUFFIXES};
pub use validate::{count_words, validate_explanations, ExplanationSummary};
