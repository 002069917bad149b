//! Candidate generation: bounded-distance scan over a frequency table.

use crate::edit_distance::levenshtein;
use recipe_core::freq::FrequencyTable;

/// Maximum edit distance for single-word candidates.
pub const MAX_WORD_DISTANCE: usize = 2;
/// Maximum edit distance for bigram candidates (space-joined form).
pub const MAX_BIGRAM_DISTANCE: usize = 3;

/// Scan every key of `table` and keep `(candidate, distance)` pairs
/// within `max_distance` edits of `observed`.
///
/// The same scan serves words and bigrams, since bigram keys are stored
/// space-joined. O(|table|) per call, which only runs once per
/// out-of-vocabulary token per request.
pub fn candidates_within(
    table: &FrequencyTable,
    observed: &str,
    max_distance: usize,
) -> Vec<(String, usize)> {
    let observed = observed.to_lowercase();
    let mut candidates = Vec::new();
    for key in table.keys() {
        let distance = levenshtein(&observed, key);
        if distance <= max_distance {
            candidates.push((key.to_string(), distance));
        }
    }
    candidates
}
