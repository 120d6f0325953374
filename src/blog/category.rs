//! Display categories.
//!
//! Posts carry free-text categories. For display and filtering they are folded
//! onto a handful of canonical names through a fixed synonym table; anything
//! not in the table is shown as written.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::types::Post;

pub const PMI_INSIGHTS: &str = "PMI Insights";
pub const HEALTHCARE: &str = "Healthcare";
pub const DIGITAL_HEALTH: &str = "Digital Health";
pub const MENTAL_HEALTH: &str = "Mental Health";

/// Canonical categories in display order.
pub const CANONICAL_CATEGORIES: [&str; 4] = [PMI_INSIGHTS, HEALTHCARE, DIGITAL_HEALTH, MENTAL_HEALTH];

/// Filter value that matches every post.
pub const ALL_CATEGORIES: &str = "All";

lazy_static! {
    static ref CATEGORY_SYNONYMS: HashMap<&'static str, &'static str> = {
        let entries = [
            ("pmi insights", PMI_INSIGHTS),
            ("pmi", PMI_INSIGHTS),
            ("insurance tips", PMI_INSIGHTS),
            ("insurance", PMI_INSIGHTS),
            ("private medical insurance", PMI_INSIGHTS),
            ("health insurance", PMI_INSIGHTS),
            ("employee benefits", PMI_INSIGHTS),
            ("group insurance", PMI_INSIGHTS),
            ("healthcare", HEALTHCARE),
            ("health care", HEALTHCARE),
            ("health", HEALTHCARE),
            ("wellness", HEALTHCARE),
            ("health & wellness", HEALTHCARE),
            ("health and wellness", HEALTHCARE),
            ("workplace health", HEALTHCARE),
            ("digital health", DIGITAL_HEALTH),
            ("health tech", DIGITAL_HEALTH),
            ("healthtech", DIGITAL_HEALTH),
            ("technology", DIGITAL_HEALTH),
            ("telemedicine", DIGITAL_HEALTH),
            ("virtual gp", DIGITAL_HEALTH),
            ("mental health", MENTAL_HEALTH),
            ("wellbeing", MENTAL_HEALTH),
            ("mental wellbeing", MENTAL_HEALTH),
            ("employee wellbeing", MENTAL_HEALTH),
            ("stress", MENTAL_HEALTH),
        ];
        entries.into_iter().collect()
    };
}

/// Fold a raw category onto its display name. Unknown values pass through
/// trimmed but otherwise untouched.
pub fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    match CATEGORY_SYNONYMS.get(trimmed.to_lowercase().as_str()) {
        Some(canonical) => canonical.to_string(),
        None => trimmed.to_string(),
    }
}

/// Whether `post` belongs under the `display_category` filter.
///
/// Mental Health posts are also listed under Healthcare. The inclusion is one
/// way only: a Healthcare post never shows up under Mental Health.
pub fn matches_category(post: &Post, display_category: &str) -> bool {
    let filter = display_category.trim();
    if filter.is_empty() || filter.eq_ignore_ascii_case(ALL_CATEGORIES) {
        return true;
    }

    let post_category = normalize_category(&post.category);
    let filter = normalize_category(filter);

    if post_category.eq_ignore_ascii_case(&filter) {
        return true;
    }

    post_category == MENTAL_HEALTH && filter == HEALTHCARE
}

/// Distinct display categories of `posts`: canonical ones first in canonical
/// order, then pass-through values in order of first appearance.
pub fn list_categories(posts: &[Post]) -> Vec<String> {
    let normalized: Vec<String> = posts.iter().map(|p| normalize_category(&p.category)).collect();

    let mut categories: Vec<String> = CANONICAL_CATEGORIES
        .iter()
        .filter(|canonical| normalized.iter().any(|c| c == *canonical))
        .map(|c| c.to_string())
        .collect();

    for category in normalized {
        if category.is_empty() || categories.iter().any(|c| c.eq_ignore_ascii_case(&category)) {
            continue;
        }
        categories.push(category);
    }

    categories
}
