//! Archive consistency checks and completion scoring.
//!
//! The score is a single ratio over every requirement of the capsule policy:
//!
//! ```text
//! achieved = min(news, N) + min(personal, P) + min(memes, M)
//!          + items with enough tags
//!          + personal items with a long enough explanation
//!          + meme items with a long enough explanation
//!          + (exactly one capsule ? 1 : 0)
//! required = N + P + M + items + personal items + meme items + 1
//! ```

mod crossref;
mod policy;

pub use crossref::{cross_reference, CrossReference};
pub use policy::ScoringPolicy;

use crate::explanation::ExplanationSummary;
use crate::models::{ArchiveItem, CategoryProgress, CompletionReport, TagCheck, TypeCategory};

/// Score parsed (and metadata-merged) items against the archive listing.
///
/// Pure: explanation reads have already happened in `explanations`.
pub fn score_archive(
    items: &[ArchiveItem],
    listing: &[String],
    explanations: &ExplanationSummary,
    manifest_filename: Option<&str>,
    policy: &ScoringPolicy,
) -> CompletionReport {
    let news = items.iter().filter(|item| item.is_news()).count();
    let personal = count_category(items, TypeCategory::Personal);
    let memes = count_category(items, TypeCategory::Meme);
    let capsules = count_category(items, TypeCategory::Capsule);
    let capsule_present = capsules == 1;

    let tag_checks: Vec<TagCheck> = items.iter().map(|item| check_tags(item, policy)).collect();
    let tags_passing = tag_checks.iter().filter(|check| check.passed).count();

    let personal_explanations = explanations.personal_progress();
    let meme_explanations = explanations.meme_progress();

    let crossref = cross_reference(
        items,
        listing,
        manifest_filename,
        &explanations.resolved_files(),
    );

    let achieved = news.min(policy.news_required)
        + personal.min(policy.personal_required)
        + memes.min(policy.memes_required)
        + tags_passing
        + personal_explanations.achieved
        + meme_explanations.achieved
        + usize::from(capsule_present);
    let required = policy.news_required
        + policy.personal_required
        + policy.memes_required
        + items.len()
        + personal
        + memes
        + 1;

    let report = CompletionReport {
        news: CategoryProgress::at_least(news, policy.news_required),
        personal: CategoryProgress::at_least(personal, policy.personal_required),
        memes: CategoryProgress::at_least(memes, policy.memes_required),
        capsule: CategoryProgress::exactly(capsules, 1),
        tags: CategoryProgress::exactly(tags_passing, items.len()),
        personal_explanations,
        meme_explanations,
        tag_checks,
        explanation_checks: explanations.checks.clone(),
        extra_files: crossref.extra_files,
        missing_files: crossref.missing_files,
        achieved,
        required,
        percentage: percentage(achieved, required),
    };

    tracing::info!(
        "Scored {} items: {}/{} ({}%)",
        items.len(),
        report.achieved,
        report.required,
        report.percentage
    );

    report
}

fn count_category(items: &[ArchiveItem], category: TypeCategory) -> usize {
    items
        .iter()
        .filter(|item| item.category() == category)
        .count()
}

/// Tag sufficiency for one item.
///
/// Capsules are exempt. Personal items also need a title.
fn check_tags(item: &ArchiveItem, policy: &ScoringPolicy) -> TagCheck {
    let tag_count = item.tags.len();
    let mut check = TagCheck {
        filename: item.filename.clone(),
        tag_count,
        required: policy.min_tags,
        exempt: false,
        passed: false,
        reason: None,
    };

    match item.category() {
        TypeCategory::Capsule => {
            check.exempt = true;
            check.required = 0;
            check.passed = true;
        }
        TypeCategory::Personal if item.title.trim().is_empty() => {
            check.reason = Some("personal items need a title".to_string());
        }
        TypeCategory::Personal | TypeCategory::Meme | TypeCategory::Generic => {
            check.passed = tag_count >= policy.min_tags;
            if !check.passed {
                check.reason = Some(format!(
                    "{} of {} tags",
                    tag_count, policy.min_tags
                ));
            }
        }
    }

    check
}

fn percentage(achieved: usize, required: usize) -> u32 {
    if required == 0 {
        return 0;
    }
    (100.0 * achieved as f64 / required as f64).round() as u32
}
