use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use recipe_core::corpus::Corpus;
use recipe_core::traits::{RankingModel, FEATURE_LEN};
use recipe_core::types::{Bookmark, Recipe};
use recipe_recommend::features::extract_features;
use recipe_recommend::scorer::heuristic_score;
use recipe_recommend::{
    folder_summary, load_ranking_model, LinearRankingModel, Recommender, ScoringWeights,
    TasteProfile,
};
use tempfile::TempDir;

fn recipe(id: u64, category: &str, keywords: &[&str], rating: f64, reviews: f64) -> Recipe {
    Recipe {
        id,
        name: format!("Recipe {}", id),
        description: None,
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        ingredient_parts: vec![],
        instructions: vec![],
        aggregated_rating: Some(rating),
        review_count: reviews,
        category: Some(category.to_string()),
        total_time_minutes: 30,
        prep_time_minutes: 10,
        cook_time_minutes: 20,
        image_url: String::new(),
        all_image_urls: vec![],
    }
}

fn bookmark(user: u64, folder: u64, recipe: u64, rating: u8) -> Bookmark {
    Bookmark { user_id: user, folder_id: folder, recipe_id: recipe, rating }
}

fn sample_corpus() -> Corpus {
    Corpus::from_recipes(vec![
        recipe(1, "Dessert", &["sweet", "baked"], 4.5, 120.0),
        recipe(2, "Dessert", &["sweet", "chocolate"], 4.0, 80.0),
        recipe(3, "Soup", &["savory", "warm"], 3.5, 10.0),
        recipe(4, "Dessert", &["baked", "fruit"], 5.0, 40.0),
        recipe(5, "Salad", &["fresh"], 2.0, 5.0),
    ])
}

#[test]
fn profile_aggregates_bookmarks() {
    let corpus = sample_corpus();
    let bookmarks = vec![bookmark(1, 1, 1, 5), bookmark(1, 1, 3, 3)];
    let profile = TasteProfile::from_bookmarks(&corpus, &bookmarks);

    assert!((profile.avg_rating - 4.0).abs() < 1e-12);
    let expected: HashSet<String> = ["sweet", "baked", "savory", "warm"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(profile.keywords, expected);
    // One Dessert and one Soup bookmark: first encountered wins the tie.
    assert_eq!(profile.dominant_category.as_deref(), Some("Dessert"));
}

#[test]
fn empty_profile_is_default() {
    let corpus = sample_corpus();
    let profile = TasteProfile::from_bookmarks(&corpus, &[]);
    assert_eq!(profile.avg_rating, 0.0);
    assert!(profile.keywords.is_empty());
    assert!(profile.dominant_category.is_none());
}

#[test]
fn feature_vector_layout() {
    let corpus = sample_corpus();
    let bookmarks = vec![bookmark(1, 1, 1, 4)];
    let profile = TasteProfile::from_bookmarks(&corpus, &bookmarks);

    let features = extract_features(corpus.get(2).unwrap(), &profile);
    assert_eq!(features.len(), FEATURE_LEN);
    assert_eq!(features[0], 1.0); // "sweet" overlaps
    assert!((features[1] - 0.0).abs() < 1e-12); // |4.0 - 4.0|
    assert_eq!(features[2], 1.0); // Dessert matches Dessert
    assert_eq!(features[3], 80.0);
    assert_eq!(features[4], 30.0);
}

#[test]
fn heuristic_score_formula() {
    let corpus = sample_corpus();
    let bookmarks = vec![bookmark(1, 1, 1, 4)];
    let profile = TasteProfile::from_bookmarks(&corpus, &bookmarks);
    let weights = ScoringWeights::default();

    // Recipe 2: overlap 1, rating diff 0, category match, 80 reviews.
    let score = heuristic_score(corpus.get(2).unwrap(), &profile, &weights);
    assert!((score - (2.0 + 5.0 + 5.0 + 8.0)).abs() < 1e-9);

    // Recipe 5: no overlap, diff 2, no category match, 5 reviews.
    let score = heuristic_score(corpus.get(5).unwrap(), &profile, &weights);
    assert!((score - (0.0 + 3.0 + 0.0 + 0.5)).abs() < 1e-9);
}

#[test]
fn linear_model_round_trip_and_scoring() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("ranking_model.json");
    let artifact = LinearRankingModel { weights: [1.0, -1.0, 2.0, 0.0, 0.0], bias: 0.5 };
    std::fs::write(&path, serde_json::to_string(&artifact).unwrap()).unwrap();

    let model = load_ranking_model(&path).expect("model should load");
    let scores = model
        .score_batch(&[[2.0, 1.0, 1.0, 99.0, 5.0]])
        .expect("scoring");
    assert!((scores[0] - (0.5 + 2.0 - 1.0 + 2.0)).abs() < 1e-12);
}

#[test]
fn absent_or_malformed_model_is_none() {
    let tmp = TempDir::new().unwrap();
    assert!(load_ranking_model(&tmp.path().join("missing.json")).is_none());

    let bad = tmp.path().join("bad.json");
    std::fs::write(&bad, "not json").unwrap();
    assert!(load_ranking_model(&bad).is_none());
}

#[test]
fn bookmarked_recipes_are_never_recommended() {
    let corpus = sample_corpus();
    let recommender = Recommender::new(ScoringWeights::default(), None);
    let bookmarks = vec![bookmark(7, 1, 1, 5), bookmark(7, 1, 2, 4)];
    let excluded: HashSet<u64> = bookmarks.iter().map(|b| b.recipe_id).collect();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let recommended = recommender.recommend(&corpus, &bookmarks, &excluded, 10, &mut rng);
        assert!(recommended.len() <= 3);
        assert!(recommended.iter().all(|r| !excluded.contains(&r.id)));
        // Disjoint slices: no recipe appears twice.
        let ids: HashSet<u64> = recommended.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), recommended.len());
    }
}

#[test]
fn no_bookmarks_yields_uniform_sample() {
    let corpus = sample_corpus();
    let recommender = Recommender::new(ScoringWeights::default(), None);
    let mut rng = StdRng::seed_from_u64(42);

    let recommended = recommender.recommend(&corpus, &[], &HashSet::new(), 3, &mut rng);
    assert_eq!(recommended.len(), 3);

    let all = recommender.recommend(&corpus, &[], &HashSet::new(), 50, &mut rng);
    assert_eq!(all.len(), 5);
}

#[test]
fn exhausted_pool_is_empty_not_an_error() {
    let corpus = sample_corpus();
    let recommender = Recommender::new(ScoringWeights::default(), None);
    let excluded: HashSet<u64> = corpus.iter().map(|r| r.id).collect();
    let mut rng = StdRng::seed_from_u64(1);

    let recommended = recommender.recommend(&corpus, &[], &excluded, 10, &mut rng);
    assert!(recommended.is_empty());
}

struct FailingModel;

impl RankingModel for FailingModel {
    fn score_batch(&self, _features: &[[f64; FEATURE_LEN]]) -> anyhow::Result<Vec<f64>> {
        anyhow::bail!("inference backend unavailable")
    }
}

#[test]
fn model_failure_falls_back_to_heuristic() {
    let corpus = sample_corpus();
    let recommender = Recommender::new(ScoringWeights::default(), Some(Box::new(FailingModel)));
    let bookmarks = vec![bookmark(7, 1, 1, 5)];
    let excluded: HashSet<u64> = bookmarks.iter().map(|b| b.recipe_id).collect();
    let mut rng = StdRng::seed_from_u64(3);

    // The request must still succeed and honor the exclusion set.
    let recommended = recommender.recommend(&corpus, &bookmarks, &excluded, 10, &mut rng);
    assert!(!recommended.is_empty());
    assert!(recommended.iter().all(|r| r.id != 1));
}

#[test]
fn folder_summary_reports_counts_and_keywords() {
    let corpus = sample_corpus();
    let summary = folder_summary(&corpus, 9, &[bookmark(1, 9, 1, 5), bookmark(1, 9, 3, 2)]);
    assert_eq!(summary.folder_id, 9);
    assert_eq!(summary.num_bookmarks, 2);
    assert!((summary.avg_rating - 3.5).abs() < 1e-12);
    assert_eq!(summary.keywords, vec!["baked", "savory", "sweet", "warm"]);

    let empty = folder_summary(&corpus, 10, &[]);
    assert_eq!(empty.num_bookmarks, 0);
    assert!(empty.keywords.is_empty());
}
