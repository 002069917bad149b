use crate::profile::TasteProfile;
use recipe_core::traits::FEATURE_LEN;
use recipe_core::types::{normalized_terms, Recipe};
use std::collections::HashSet;

/// Number of profile keywords also present on the recipe.
pub fn keyword_overlap(recipe: &Recipe, profile: &TasteProfile) -> usize {
    let recipe_keywords: HashSet<String> = normalized_terms(&recipe.keywords).into_iter().collect();
    recipe_keywords
        .iter()
        .filter(|kw| profile.keywords.contains(kw.as_str()))
        .count()
}

/// Fixed-layout feature vector consumed by the ranking model:
/// `[keyword overlap, |avg rating - recipe rating|, category match (0/1),
/// review count, total time in minutes]`.
pub fn extract_features(recipe: &Recipe, profile: &TasteProfile) -> [f64; FEATURE_LEN] {
    let overlap = keyword_overlap(recipe, profile) as f64;
    let rating_diff = (profile.avg_rating - recipe.rating_or_default()).abs();
    let category_match = if profile.is_dominant_category(recipe.category.as_deref()) {
        1.0
    } else {
        0.0
    };
    [
        overlap,
        rating_diff,
        category_match,
        recipe.review_count,
        f64::from(recipe.total_time_minutes),
    ]
}
