//! Noisy-channel scoring: corruption likelihood times frequency prior.

use recipe_core::freq::FrequencyTable;
use std::cmp::Ordering;

/// Suggestions retained per corrected token.
pub const MAX_SUGGESTIONS: usize = 5;

/// P(observed | candidate) as a fixed step function of edit distance.
/// The breakpoints are part of the behavioral contract, not a fitted
/// model: 1.0 exact, 0.8 at one edit, 0.2 at two, 0.05 at three
/// (bigrams only), 0.0 beyond.
pub fn error_model(observed: &str, candidate: &str, edit_distance: usize) -> f64 {
    if observed == candidate {
        return 1.0;
    }
    match edit_distance {
        1 => 0.8,
        2 => 0.2,
        3 => 0.05,
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub term: String,
    pub score: f64,
    pub distance: usize,
}

/// Score candidates against `table`'s prior and rank by `(-score,
/// distance)`, truncated to the top `MAX_SUGGESTIONS`.
pub fn rank_candidates(
    table: &FrequencyTable,
    observed: &str,
    candidates: Vec<(String, usize)>,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|(term, distance)| {
            let score = error_model(observed, &term, distance) * table.probability(&term);
            ScoredCandidate { term, score, distance }
        })
        .collect();
    // The term tie-break keeps the ordering independent of map iteration
    // order, so corrections are byte-identical across runs.
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.distance.cmp(&b.distance))
            .then_with(|| a.term.cmp(&b.term))
    });
    scored.truncate(MAX_SUGGESTIONS);
    scored
}
