//! Query correction pipeline: per-word correction, one bigram repair
//! pass, then an exact-phrase override.

use crate::candidates::{candidates_within, MAX_BIGRAM_DISTANCE, MAX_WORD_DISTANCE};
use crate::noisy::rank_candidates;
use recipe_core::freq::FrequencyTable;
use std::collections::HashMap;
use tracing::debug;

/// Static table of whole-query overrides for common recipe misspellings.
/// Keys are lowercase and whitespace-normalized; a verbatim match wins
/// over any computed correction.
#[derive(Debug, Clone, Default)]
pub struct PhraseOverrides {
    map: HashMap<String, String>,
}

impl PhraseOverrides {
    /// The misspelled phrases seen most often in recipe search logs.
    pub fn common_recipe_typos() -> Self {
        let mut overrides = Self::default();
        for (from, to) in [
            ("chicken beads", "chicken breasts"),
            ("chiken beads", "chicken breasts"),
            ("chiken breasts", "chicken breasts"),
            ("chicken brests", "chicken breasts"),
            ("oliv oil", "olive oil"),
            ("garlic power", "garlic powder"),
            ("tamoto", "tomato"),
            ("brown suger", "brown sugar"),
            ("wheat flower", "wheat flour"),
            ("soi sauce", "soy sauce"),
            ("backed chicken", "baked chicken"),
        ] {
            overrides.insert(from, to);
        }
        overrides
    }

    pub fn insert(&mut self, from: &str, to: &str) {
        self.map.insert(from.to_string(), to.to_string());
    }

    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.map.get(phrase).map(String::as_str)
    }
}

/// Result of correcting one query. `suggestions` is empty whenever the
/// corrected query equals the normalized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub corrected: String,
    pub suggestions: Vec<String>,
}

/// Noisy-channel spelling corrector over unigram and bigram statistics.
/// Read-only after construction; deterministic for a given table pair.
pub struct SpellCorrector {
    unigrams: FrequencyTable,
    bigrams: FrequencyTable,
    phrases: PhraseOverrides,
}

impl SpellCorrector {
    pub fn new(
        unigrams: FrequencyTable,
        bigrams: FrequencyTable,
        phrases: PhraseOverrides,
    ) -> Self {
        Self { unigrams, bigrams, phrases }
    }

    pub fn unigrams(&self) -> &FrequencyTable {
        &self.unigrams
    }

    /// Correct a raw, possibly multi-word query.
    ///
    /// Each token is corrected independently against the original token
    /// list, then one left-to-right bigram repair pass runs over the
    /// word-corrected sequence (overwritten positions are not
    /// re-scanned), and finally the whole query is checked against the
    /// phrase override table.
    pub fn correct(&self, query: &str) -> Correction {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Correction { corrected: query.to_string(), suggestions: Vec::new() };
        }

        let normalized = trimmed.to_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let mut corrected_words: Vec<String> = Vec::with_capacity(words.len());
        let mut word_suggestions: Vec<Vec<String>> = Vec::with_capacity(words.len());
        for word in &words {
            let (corrected, suggestions) = self.correct_word(word);
            corrected_words.push(corrected);
            word_suggestions.push(suggestions);
        }

        if corrected_words.len() >= 2 {
            for i in 0..corrected_words.len() - 1 {
                let bigram = format!("{} {}", corrected_words[i], corrected_words[i + 1]);
                if self.bigrams.contains(&bigram) {
                    continue;
                }
                let candidates = candidates_within(&self.bigrams, &bigram, MAX_BIGRAM_DISTANCE);
                if candidates.is_empty() {
                    continue;
                }
                let ranked = rank_candidates(&self.bigrams, &bigram, candidates);
                if let Some(best) = ranked.first() {
                    let mut parts = best.term.split_whitespace();
                    if let (Some(first), Some(second)) = (parts.next(), parts.next()) {
                        debug!(observed = %bigram, replacement = %best.term, "bigram repair");
                        corrected_words[i] = first.to_string();
                        corrected_words[i + 1] = second.to_string();
                        word_suggestions[i] = vec![first.to_string()];
                        word_suggestions[i + 1] = vec![second.to_string()];
                    }
                }
            }
        }

        let mut corrected = corrected_words.join(" ");
        let mut suggestions: Vec<String> = Vec::new();
        if let Some(phrase) = self.phrases.get(&corrected) {
            debug!(observed = %corrected, replacement = %phrase, "phrase override");
            corrected = phrase.to_string();
            suggestions.push(corrected.clone());
        } else {
            for (i, word) in words.iter().enumerate() {
                if corrected_words[i] != *word {
                    suggestions.extend(word_suggestions[i].iter().cloned());
                }
            }
        }

        if corrected == normalized {
            suggestions.clear();
        }
        Correction { corrected, suggestions }
    }

    /// Single-token path: in-vocabulary tokens pass through untouched,
    /// everything else gets the top noisy-channel candidate (or stays
    /// as-is when no candidate qualifies).
    fn correct_word(&self, word: &str) -> (String, Vec<String>) {
        if self.unigrams.contains(word) {
            return (word.to_string(), Vec::new());
        }
        let candidates = candidates_within(&self.unigrams, word, MAX_WORD_DISTANCE);
        if candidates.is_empty() {
            return (word.to_string(), Vec::new());
        }
        let ranked = rank_candidates(&self.unigrams, word, candidates);
        let top: Vec<String> = ranked.into_iter().map(|c| c.term).collect();
        match top.first() {
            Some(best) if best != word => (best.clone(), top),
            Some(best) => (best.clone(), Vec::new()),
            None => (word.to_string(), Vec::new()),
        }
    }
}
