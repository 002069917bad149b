//! Domain types shared by the spelling, search and recommendation engines.

use serde::{Deserialize, Serialize};

pub type RecipeId = u64;
pub type UserId = u64;
pub type FolderId = u64;

/// A recipe as handed off by the offline preprocessing step.
///
/// Array-like fields are already parsed into lists, durations into
/// minutes, and one primary image URL is split out from the full list.
/// Recipes are loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub ingredient_parts: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub aggregated_rating: Option<f64>,
    #[serde(default)]
    pub review_count: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub total_time_minutes: u32,
    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub cook_time_minutes: u32,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub all_image_urls: Vec<String>,
}

impl Recipe {
    /// Aggregated rating with the unrated case treated as 0.
    pub fn rating_or_default(&self) -> f64 {
        self.aggregated_rating.unwrap_or(0.0)
    }
}

/// Association of a user, a folder, a recipe and a 1-5 rating. Owned by
/// the bookmark collaborator; this engine only reads them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    pub user_id: UserId,
    pub folder_id: FolderId,
    pub recipe_id: RecipeId,
    pub rating: u8,
}

/// Lowercase `raw` terms, strip surrounding quote characters, and drop
/// entries that are empty or purely numeric (raw tag dumps carry stray
/// numeric ids alongside real keywords).
pub fn normalized_terms(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|t| t.trim_matches('"').to_lowercase())
        .filter(|t| !t.is_empty() && !t.chars().all(|c| c.is_ascii_digit()))
        .collect()
}
