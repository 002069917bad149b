use recipe_core::corpus::Corpus;
use recipe_core::types::{normalized_terms, Bookmark};
use std::collections::{HashMap, HashSet};

/// A user's taste profile over the bookmarks in scope: average bookmark
/// rating (0 when empty), union of bookmarked-recipe keywords, and the
/// most frequent recipe category (first encountered wins ties).
#[derive(Debug, Clone, Default)]
pub struct TasteProfile {
    pub avg_rating: f64,
    pub keywords: HashSet<String>,
    pub dominant_category: Option<String>,
}

impl TasteProfile {
    pub fn from_bookmarks(corpus: &Corpus, bookmarks: &[Bookmark]) -> Self {
        if bookmarks.is_empty() {
            return Self::default();
        }
        let avg_rating =
            bookmarks.iter().map(|b| f64::from(b.rating)).sum::<f64>() / bookmarks.len() as f64;

        let mut keywords = HashSet::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut dominant: Option<(String, usize)> = None;
        for bookmark in bookmarks {
            let Some(recipe) = corpus.get(bookmark.recipe_id) else {
                continue;
            };
            keywords.extend(normalized_terms(&recipe.keywords));
            if let Some(category) = &recipe.category {
                let count = counts.entry(category.clone()).or_insert(0);
                *count += 1;
                // Strictly-greater keeps the first category to reach a
                // given count as the tie winner.
                let replace = match &dominant {
                    Some((_, best)) => *count > *best,
                    None => true,
                };
                if replace {
                    dominant = Some((category.clone(), *count));
                }
            }
        }

        Self {
            avg_rating,
            keywords,
            dominant_category: dominant.map(|(category, _)| category),
        }
    }

    /// True when `category` matches the dominant category.
    pub fn is_dominant_category(&self, category: Option<&str>) -> bool {
        match (&self.dominant_category, category) {
            (Some(dominant), Some(category)) => dominant == category,
            _ => false,
        }
    }
}
