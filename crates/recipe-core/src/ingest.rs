//! Offline preprocessing: raw tabular recipe dump -> corpus snapshot plus
//! unigram/bigram frequency tables.
//!
//! Runs once, offline. The serving path only ever sees the parsed
//! snapshot this module writes.

use crate::corpus::Corpus;
use crate::freq::FrequencyTable;
use crate::types::Recipe;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// One row of the raw recipe dump, before field parsing. Array-like
/// columns arrive as `c("item1", "item2", ...)` strings and durations as
/// ISO-8601 (`PT1H30M`).
#[derive(Debug, Deserialize)]
pub struct RawRecipeRow {
    #[serde(rename = "RecipeId")]
    pub id: u64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Keywords", default)]
    pub keywords: String,
    #[serde(rename = "RecipeIngredientParts", default)]
    pub ingredient_parts: String,
    #[serde(rename = "RecipeInstructions", default)]
    pub instructions: String,
    #[serde(rename = "AggregatedRating", default)]
    pub aggregated_rating: Option<f64>,
    #[serde(rename = "ReviewCount", default)]
    pub review_count: Option<f64>,
    #[serde(rename = "RecipeCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "TotalTime", default)]
    pub total_time: String,
    #[serde(rename = "PrepTime", default)]
    pub prep_time: String,
    #[serde(rename = "CookTime", default)]
    pub cook_time: String,
    #[serde(rename = "Images", default)]
    pub images: String,
}

/// Parse the dump's `c("a", "b", ...)` array syntax into a list. A bare
/// non-empty string is treated as a single-item list.
pub fn parse_array_field(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    if let Some(content) = raw.strip_prefix("c(").and_then(|s| s.strip_suffix(')')) {
        let mut items = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        for ch in content.chars() {
            match ch {
                '"' => {
                    if in_quotes {
                        let item = current.trim();
                        if !item.is_empty() {
                            items.push(item.to_string());
                        }
                        current.clear();
                    }
                    in_quotes = !in_quotes;
                }
                _ if in_quotes => current.push(ch),
                _ => {}
            }
        }
        return items;
    }
    vec![raw.to_string()]
}

/// Convert an ISO-8601 duration such as `PT24H45M` into total minutes.
/// Anything that does not look like a duration maps to 0.
pub fn parse_duration_minutes(raw: &str) -> u32 {
    let Some(body) = raw.trim().strip_prefix("PT") else {
        return 0;
    };
    let mut minutes = 0u32;
    let mut number = 0u32;
    for ch in body.chars() {
        match ch {
            '0'..='9' => {
                number = number
                    .saturating_mul(10)
                    .saturating_add(u32::from(ch) - u32::from('0'));
            }
            'H' => {
                minutes = minutes.saturating_add(number.saturating_mul(60));
                number = 0;
            }
            'M' => {
                minutes = minutes.saturating_add(number);
                number = 0;
            }
            // Seconds and anything unrecognized are dropped.
            _ => number = 0,
        }
    }
    minutes
}

/// Extract every double-quoted http(s) URL from the raw `Images` column.
pub fn parse_image_urls(raw: &str) -> Vec<String> {
    let mut urls = Vec::new();
    let mut rest = raw;
    while let Some(start) = rest.find('"') {
        rest = &rest[start + 1..];
        let Some(end) = rest.find('"') else { break };
        let candidate = &rest[..end];
        if candidate.starts_with("http://") || candidate.starts_with("https://") {
            urls.push(candidate.to_string());
        }
        rest = &rest[end + 1..];
    }
    urls
}

/// Strip stray surrounding quote characters from a single URL.
pub fn clean_image_url(url: &str) -> String {
    url.trim_matches('"').to_string()
}

/// Lowercase alphanumeric-run tokenizer used for the frequency corpus.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse one raw row into the serving-side `Recipe` schema.
pub fn recipe_from_row(row: RawRecipeRow) -> Recipe {
    let all_image_urls = parse_image_urls(&row.images);
    let image_url = all_image_urls
        .first()
        .map(|u| clean_image_url(u))
        .unwrap_or_default();
    Recipe {
        id: row.id,
        name: row.name,
        description: row.description.filter(|d| !d.trim().is_empty()),
        keywords: parse_array_field(&row.keywords),
        ingredient_parts: parse_array_field(&row.ingredient_parts),
        instructions: parse_array_field(&row.instructions),
        aggregated_rating: row.aggregated_rating,
        review_count: row.review_count.unwrap_or(0.0),
        category: row.category.filter(|c| !c.trim().is_empty()),
        total_time_minutes: parse_duration_minutes(&row.total_time),
        prep_time_minutes: parse_duration_minutes(&row.prep_time),
        cook_time_minutes: parse_duration_minutes(&row.cook_time),
        image_url,
        all_image_urls,
    }
}

/// Read the raw CSV dump into parsed recipes.
pub fn read_csv_dump(path: &Path) -> Result<Vec<Recipe>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening recipe dump {}", path.display()))?;
    let mut recipes = Vec::new();
    for row in reader.deserialize() {
        let row: RawRecipeRow =
            row.with_context(|| format!("reading recipe dump {}", path.display()))?;
        recipes.push(recipe_from_row(row));
    }
    info!(path = %path.display(), recipes = recipes.len(), "parsed recipe dump");
    Ok(recipes)
}

/// Build unigram and bigram frequency tables over recipe names and
/// keywords, the vocabulary the spelling corrector draws from.
pub fn build_frequency_tables(corpus: &Corpus) -> (FrequencyTable, FrequencyTable) {
    let mut unigrams: HashMap<String, u64> = HashMap::new();
    let mut bigrams: HashMap<String, u64> = HashMap::new();
    for recipe in corpus.iter() {
        let mut text = recipe.name.clone();
        for kw in &recipe.keywords {
            text.push(' ');
            text.push_str(kw);
        }
        let tokens = tokenize(&text);
        for token in &tokens {
            *unigrams.entry(token.clone()).or_insert(0) += 1;
        }
        for pair in tokens.windows(2) {
            *bigrams.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
        }
    }
    info!(
        unigrams = unigrams.len(),
        bigrams = bigrams.len(),
        "built frequency tables"
    );
    (FrequencyTable::new(unigrams), FrequencyTable::new(bigrams))
}
