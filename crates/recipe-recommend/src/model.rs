//! Optional on-disk ranking model artifact.

use anyhow::{bail, Context, Result};
use recipe_core::traits::{RankingModel, FEATURE_LEN};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Linear scorer trained offline. Weights follow the feature layout of
/// `features::extract_features`; the artifact is JSON on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRankingModel {
    pub weights: [f64; FEATURE_LEN],
    pub bias: f64,
}

impl LinearRankingModel {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading ranking model {}", path.display()))?;
        let model: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing ranking model {}", path.display()))?;
        if !model.weights.iter().chain([&model.bias]).all(|w| w.is_finite()) {
            bail!("ranking model {} has non-finite weights", path.display());
        }
        Ok(model)
    }
}

impl RankingModel for LinearRankingModel {
    fn score_batch(&self, features: &[[f64; FEATURE_LEN]]) -> Result<Vec<f64>> {
        Ok(features
            .iter()
            .map(|f| {
                self.bias
                    + f.iter()
                        .zip(self.weights.iter())
                        .map(|(x, w)| x * w)
                        .sum::<f64>()
            })
            .collect())
    }
}

/// Load the ranking model artifact if it exists. A missing or unreadable
/// artifact is a normal state, not an error; the recommender falls back
/// to heuristic scoring.
pub fn load_ranking_model(path: &Path) -> Option<Box<dyn RankingModel>> {
    if !path.exists() {
        warn!(path = %path.display(), "ranking model not found, using heuristic scoring");
        return None;
    }
    match LinearRankingModel::load(path) {
        Ok(model) => {
            info!(path = %path.display(), "loaded ranking model");
            Some(Box::new(model))
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to load ranking model, using heuristic scoring");
            None
        }
    }
}
