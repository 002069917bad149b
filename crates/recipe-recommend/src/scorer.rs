use crate::features::keyword_overlap;
use crate::profile::TasteProfile;
use recipe_core::types::Recipe;
use serde::Deserialize;

/// Heuristic fallback weights. The exact constants are a policy choice;
/// these defaults favor the dominant category heavily and popularity
/// lightly. Overridable via the `recommend` config section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringWeights {
    pub keyword_weight: f64,
    pub category_bonus: f64,
    pub review_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self { keyword_weight: 2.0, category_bonus: 5.0, review_weight: 0.1 }
    }
}

/// Heuristic relevance score used whenever no learned model is loaded:
/// `keyword_weight * overlap + (5 - min(5, |avg - rating|)) +
/// category_bonus + review_weight * review_count`.
pub fn heuristic_score(recipe: &Recipe, profile: &TasteProfile, weights: &ScoringWeights) -> f64 {
    let overlap = keyword_overlap(recipe, profile) as f64;
    let rating_diff = (profile.avg_rating - recipe.rating_or_default()).abs().min(5.0);
    let category_bonus = if profile.is_dominant_category(recipe.category.as_deref()) {
        weights.category_bonus
    } else {
        0.0
    };
    weights.keyword_weight * overlap
        + (5.0 - rating_diff)
        + category_bonus
        + weights.review_weight * recipe.review_count
}
