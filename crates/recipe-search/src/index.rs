use recipe_core::types::{normalized_terms, Recipe, RecipeId};

/// Lowercased searchable text for one recipe: name, description,
/// keywords and ingredient parts (numeric-only tokens excluded, quotes
/// stripped), and instructions joined with spaces.
pub fn searchable_blob(recipe: &Recipe) -> String {
    let name = recipe.name.to_lowercase();
    let description = recipe
        .description
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let keywords = normalized_terms(&recipe.keywords).join(" ");
    let ingredients = normalized_terms(&recipe.ingredient_parts).join(" ");
    let instructions = recipe.instructions.join(" ").to_lowercase();
    [name, description, keywords, ingredients, instructions].join(" ")
}

/// Linear containment index: one precomputed blob per recipe, scanned in
/// corpus order on every query. Built once at startup and read-only
/// afterwards.
pub struct TextIndex {
    entries: Vec<(RecipeId, String)>,
}

impl TextIndex {
    pub fn build<'a, I>(recipes: I) -> Self
    where
        I: IntoIterator<Item = &'a Recipe>,
    {
        let entries = recipes
            .into_iter()
            .map(|r| (r.id, searchable_blob(r)))
            .collect();
        Self { entries }
    }

    /// Ids of recipes whose blob contains every whitespace-separated
    /// query term, preserving build order (stable filter, no re-sort).
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<RecipeId> {
        let query = query.to_lowercase();
        let terms: Vec<&str> = query.split_whitespace().collect();
        self.entries
            .iter()
            .filter(|(_, blob)| terms.iter().all(|term| blob.contains(term)))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
