//! Recommendation composition: explore, dominant-category and ranked
//! slices over the unbookmarked recipe pool.

use crate::features::extract_features;
use crate::profile::TasteProfile;
use crate::scorer::{heuristic_score, ScoringWeights};
use rand::seq::SliceRandom;
use rand::Rng;
use recipe_core::corpus::Corpus;
use recipe_core::traits::{RankingModel, FEATURE_LEN};
use recipe_core::types::{normalized_terms, Bookmark, FolderId, Recipe, RecipeId};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Size of the randomly-sampled exploration slice.
pub const EXPLORE_SLICE: usize = 5;
/// Size of the dominant-category slice.
pub const CATEGORY_SLICE: usize = 5;
/// Share of the exploration slice drawn from the dominant category.
const DOMINANT_SHARE: f64 = 0.7;
/// Sample keywords reported per folder summary.
const SUMMARY_KEYWORDS: usize = 5;

/// Summary of one folder's bookmarks, reported alongside
/// recommendations.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FolderSummary {
    pub folder_id: FolderId,
    pub avg_rating: f64,
    pub num_bookmarks: usize,
    pub keywords: Vec<String>,
}

/// Summarize one folder's bookmarks: average rating, bookmark count and
/// a few sample keywords (sorted for stable output).
pub fn folder_summary(corpus: &Corpus, folder_id: FolderId, bookmarks: &[Bookmark]) -> FolderSummary {
    if bookmarks.is_empty() {
        return FolderSummary { folder_id, avg_rating: 0.0, num_bookmarks: 0, keywords: Vec::new() };
    }
    let avg_rating =
        bookmarks.iter().map(|b| f64::from(b.rating)).sum::<f64>() / bookmarks.len() as f64;
    let mut keywords: Vec<String> = bookmarks
        .iter()
        .filter_map(|b| corpus.get(b.recipe_id))
        .flat_map(|r| normalized_terms(&r.keywords))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    keywords.sort();
    keywords.truncate(SUMMARY_KEYWORDS);
    FolderSummary { folder_id, avg_rating, num_bookmarks: bookmarks.len(), keywords }
}

/// Scores and samples unbookmarked recipes. Holds the scoring policy and
/// the optional learned model; all randomness comes from the injected
/// RNG so tests can seed it.
pub struct Recommender {
    weights: ScoringWeights,
    model: Option<Box<dyn RankingModel>>,
}

impl Recommender {
    pub fn new(weights: ScoringWeights, model: Option<Box<dyn RankingModel>>) -> Self {
        Self { weights, model }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Compose up to `limit` recommendations from the pool of recipes
    /// not in `excluded`.
    ///
    /// With no bookmarks in scope the result is a uniform random sample.
    /// Otherwise three disjoint slices are drawn - explore (biased
    /// toward the dominant category), dominant-category, and ranked -
    /// then shuffled together and truncated to `limit`.
    pub fn recommend<R: Rng>(
        &self,
        corpus: &Corpus,
        scoped_bookmarks: &[Bookmark],
        excluded: &HashSet<RecipeId>,
        limit: usize,
        rng: &mut R,
    ) -> Vec<Recipe> {
        let pool: Vec<&Recipe> = corpus.iter().filter(|r| !excluded.contains(&r.id)).collect();
        if pool.is_empty() || limit == 0 {
            return Vec::new();
        }

        if scoped_bookmarks.is_empty() {
            return pool
                .choose_multiple(rng, limit.min(pool.len()))
                .map(|r| (*r).clone())
                .collect();
        }

        let profile = TasteProfile::from_bookmarks(corpus, scoped_bookmarks);
        debug!(
            keywords = profile.keywords.len(),
            avg_rating = profile.avg_rating,
            dominant_category = ?profile.dominant_category,
            "built taste profile"
        );

        let explore = self.explore_slice(&pool, &profile, rng);
        let mut picked: HashSet<RecipeId> = explore.iter().map(|r| r.id).collect();

        let category = Self::category_slice(&pool, &profile, &picked, rng);
        picked.extend(category.iter().map(|r| r.id));

        let num_ranked = limit.saturating_sub(explore.len() + category.len());
        let ranked = self.ranked_slice(&pool, &profile, &picked, num_ranked);

        let mut combined: Vec<&Recipe> = ranked;
        combined.extend(category);
        combined.extend(explore);
        combined.shuffle(rng);
        combined.truncate(limit);
        combined.into_iter().cloned().collect()
    }

    /// Up to `EXPLORE_SLICE` random recipes, ~70/30 split toward the
    /// dominant category when one exists, topped up uniformly when
    /// either side runs short.
    fn explore_slice<'a, R: Rng>(
        &self,
        pool: &[&'a Recipe],
        profile: &TasteProfile,
        rng: &mut R,
    ) -> Vec<&'a Recipe> {
        let target = EXPLORE_SLICE.min(pool.len());
        if target == 0 {
            return Vec::new();
        }
        let Some(dominant) = profile.dominant_category.as_deref() else {
            return pool.choose_multiple(rng, target).copied().collect();
        };

        let (dominant_pool, other_pool): (Vec<&Recipe>, Vec<&Recipe>) = pool
            .iter()
            .copied()
            .partition(|r| r.category.as_deref() == Some(dominant));
        let num_dominant = (target as f64 * DOMINANT_SHARE) as usize;
        let num_other = target - num_dominant;

        let mut picked: Vec<&Recipe> = Vec::with_capacity(target);
        picked.extend(
            dominant_pool
                .choose_multiple(rng, num_dominant.min(dominant_pool.len()))
                .copied(),
        );
        picked.extend(
            other_pool
                .choose_multiple(rng, num_other.min(other_pool.len()))
                .copied(),
        );
        if picked.len() < target {
            let picked_ids: HashSet<RecipeId> = picked.iter().map(|r| r.id).collect();
            let rest: Vec<&Recipe> = pool
                .iter()
                .copied()
                .filter(|r| !picked_ids.contains(&r.id))
                .collect();
            picked.extend(
                rest.choose_multiple(rng, target - picked.len())
                    .copied(),
            );
        }
        picked
    }

    /// Up to `CATEGORY_SLICE` recipes sampled from the dominant
    /// category, skipping recipes already picked.
    fn category_slice<'a, R: Rng>(
        pool: &[&'a Recipe],
        profile: &TasteProfile,
        picked: &HashSet<RecipeId>,
        rng: &mut R,
    ) -> Vec<&'a Recipe> {
        let candidates: Vec<&Recipe> = pool
            .iter()
            .copied()
            .filter(|r| {
                !picked.contains(&r.id) && profile.is_dominant_category(r.category.as_deref())
            })
            .collect();
        candidates
            .choose_multiple(rng, CATEGORY_SLICE.min(candidates.len()))
            .copied()
            .collect()
    }

    /// Top-`n` scored recipes, via the learned model when loaded and the
    /// heuristic otherwise. A model failure falls back to the heuristic
    /// for the remainder of the request; it never fails the request.
    fn ranked_slice<'a>(
        &self,
        pool: &[&'a Recipe],
        profile: &TasteProfile,
        picked: &HashSet<RecipeId>,
        n: usize,
    ) -> Vec<&'a Recipe> {
        if n == 0 {
            return Vec::new();
        }
        let candidates: Vec<&Recipe> = pool
            .iter()
            .copied()
            .filter(|r| !picked.contains(&r.id))
            .collect();
        if candidates.is_empty() {
            return Vec::new();
        }

        let scores = match &self.model {
            Some(model) => match Self::model_scores(model.as_ref(), &candidates, profile) {
                Ok(scores) => scores,
                Err(error) => {
                    warn!(%error, "ranking model failed, falling back to heuristic scoring");
                    self.heuristic_scores(&candidates, profile)
                }
            },
            None => self.heuristic_scores(&candidates, profile),
        };

        let mut scored: Vec<(&Recipe, f64)> = candidates.into_iter().zip(scores).collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(n);
        scored.into_iter().map(|(recipe, _)| recipe).collect()
    }

    fn heuristic_scores(&self, candidates: &[&Recipe], profile: &TasteProfile) -> Vec<f64> {
        candidates
            .iter()
            .map(|r| heuristic_score(r, profile, &self.weights))
            .collect()
    }

    fn model_scores(
        model: &dyn RankingModel,
        candidates: &[&Recipe],
        profile: &TasteProfile,
    ) -> anyhow::Result<Vec<f64>> {
        let features: Vec<[f64; FEATURE_LEN]> = candidates
            .iter()
            .map(|r| extract_features(r, profile))
            .collect();
        let scores = model.score_batch(&features)?;
        if scores.len() != candidates.len() {
            anyhow::bail!(
                "model returned {} scores for {} candidates",
                scores.len(),
                candidates.len()
            );
        }
        Ok(scores)
    }
}
