//! recipe-spell
//!
//! Noisy-channel spelling correction over the recipe vocabulary: edit
//! distance, candidate generation, error-model scoring and the query
//! correction pipeline.

pub mod candidates;
pub mod corrector;
pub mod edit_distance;
pub mod noisy;

pub use corrector::{Correction, PhraseOverrides, SpellCorrector};
