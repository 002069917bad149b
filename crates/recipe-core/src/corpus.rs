//! Read-only recipe corpus, loaded once at startup from a JSON snapshot.

use crate::error::{Error, Result};
use crate::types::{Recipe, RecipeId};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// In-memory recipe corpus keyed by id, preserving snapshot order.
///
/// Never mutated after load; safe to share across request handlers
/// without synchronization.
#[derive(Debug, Default)]
pub struct Corpus {
    recipes: Vec<Recipe>,
    by_id: HashMap<RecipeId, usize>,
}

impl Corpus {
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let by_id = recipes
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.id, idx))
            .collect();
        Self { recipes, by_id }
    }

    /// Load the corpus snapshot. An absent or empty snapshot is fatal:
    /// the service must not serve traffic without its corpus.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::MissingData(format!("{}: {}", path.display(), e)))?;
        let recipes: Vec<Recipe> = serde_json::from_str(&raw).map_err(|e| Error::Snapshot {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if recipes.is_empty() {
            return Err(Error::MissingData(format!(
                "{}: corpus snapshot is empty",
                path.display()
            )));
        }
        info!(path = %path.display(), recipes = recipes.len(), "loaded recipe corpus");
        Ok(Self::from_recipes(recipes))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let raw = serde_json::to_string(&self.recipes)?;
        fs::write(path, raw)?;
        Ok(())
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.by_id.get(&id).map(|idx| &self.recipes[*idx])
    }

    /// Recipes in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
