use rand::rngs::StdRng;
use rand::SeedableRng;
use recipe_core::corpus::Corpus;
use recipe_core::freq::FrequencyTable;
use recipe_core::ingest;
use recipe_core::traits::MemoryBookmarkStore;
use recipe_core::types::{Bookmark, Recipe};
use recipe_engine::RecipeEngine;
use recipe_recommend::{Recommender, ScoringWeights};
use recipe_spell::{PhraseOverrides, SpellCorrector};

fn recipe(id: u64, name: &str, category: &str) -> Recipe {
    Recipe {
        id,
        name: name.to_string(),
        description: Some(format!("A simple {} dish", name.to_lowercase())),
        keywords: vec![category.to_string()],
        ingredient_parts: vec![],
        instructions: vec![],
        aggregated_rating: Some(4.0),
        review_count: 10.0,
        category: Some(category.to_string()),
        total_time_minutes: 25,
        prep_time_minutes: 5,
        cook_time_minutes: 20,
        image_url: String::new(),
        all_image_urls: vec![],
    }
}

fn engine() -> RecipeEngine {
    let corpus = Corpus::from_recipes(vec![
        recipe(1, "Baked Chicken", "Chicken"),
        recipe(2, "Chicken Soup", "Soup"),
        recipe(3, "Chocolate Cake", "Dessert"),
    ]);
    let (unigrams, bigrams) = ingest::build_frequency_tables(&corpus);
    let corrector = SpellCorrector::new(unigrams, bigrams, PhraseOverrides::common_recipe_typos());
    let recommender = Recommender::new(ScoringWeights::default(), None);
    RecipeEngine::new(corpus, corrector, recommender)
}

#[test]
fn misspelled_search_is_corrected() {
    let engine = engine();
    let response = engine.correct_and_search("chiken", 1, 20);

    assert_eq!(response.corrected_query.as_deref(), Some("chicken"));
    assert!(!response.suggestions.is_empty());
    assert_eq!(response.total_results, 2);
    let ids: Vec<u64> = response.recipes.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn clean_search_has_no_correction() {
    let engine = engine();
    let response = engine.correct_and_search("chicken soup", 1, 20);
    assert!(response.corrected_query.is_none());
    assert!(response.suggestions.is_empty());
    assert_eq!(response.total_results, 1);
}

#[test]
fn empty_query_pages_the_whole_corpus() {
    let engine = engine();
    let response = engine.correct_and_search("", 1, 2);
    assert!(response.corrected_query.is_none());
    assert!(response.suggestions.is_empty());
    assert_eq!(response.total_results, 3);
    assert_eq!(response.total_pages, 2);
    assert_eq!(response.recipes.len(), 2);

    let second = engine.correct_and_search("", 2, 2);
    assert_eq!(second.recipes.len(), 1);
    assert_eq!(second.current_page, 2);
}

#[test]
fn recommendations_exclude_bookmarks() {
    let engine = engine();
    let store = MemoryBookmarkStore::new(vec![Bookmark {
        user_id: 7,
        folder_id: 1,
        recipe_id: 2,
        rating: 5,
    }]);
    let mut rng = StdRng::seed_from_u64(11);

    let response = engine
        .recommend(&store, 7, None, 10, &mut rng)
        .expect("recommend");
    assert!(response.recommendations.len() <= 2);
    assert!(response.recommendations.iter().all(|r| r.id != 2));
    assert_eq!(response.message, "Suggestions based on all bookmarks.");
    assert_eq!(response.folder_summaries.len(), 1);
    assert_eq!(response.folder_summaries[0].num_bookmarks, 1);
}

#[test]
fn user_without_bookmarks_gets_random_sample() {
    let engine = engine();
    let store = MemoryBookmarkStore::default();
    let mut rng = StdRng::seed_from_u64(5);

    let response = engine
        .recommend(&store, 1, None, 2, &mut rng)
        .expect("recommend");
    assert_eq!(response.recommendations.len(), 2);
    assert_eq!(response.message, "Random suggestions due to lack of bookmarks.");
}

#[test]
fn fully_bookmarked_pool_is_a_normal_response() {
    let engine = engine();
    let store = MemoryBookmarkStore::new(vec![
        Bookmark { user_id: 7, folder_id: 1, recipe_id: 1, rating: 5 },
        Bookmark { user_id: 7, folder_id: 1, recipe_id: 2, rating: 4 },
        Bookmark { user_id: 7, folder_id: 1, recipe_id: 3, rating: 3 },
    ]);
    let mut rng = StdRng::seed_from_u64(2);

    let response = engine
        .recommend(&store, 7, None, 10, &mut rng)
        .expect("recommend");
    assert!(response.recommendations.is_empty());
    assert_eq!(response.message, "Every recipe is already bookmarked.");
}

#[test]
fn unknown_folder_scope_is_an_error() {
    let engine = engine();
    let store = MemoryBookmarkStore::default();
    let mut rng = StdRng::seed_from_u64(2);

    let result = engine.recommend(&store, 7, Some(99), 10, &mut rng);
    assert!(result.is_err());
}

#[test]
fn snapshot_round_trip_drives_the_engine() {
    // End-to-end through the on-disk contract: ingest-built tables and
    // corpus snapshots reload into a working engine.
    let tmp = tempfile::TempDir::new().unwrap();
    let corpus_path = tmp.path().join("recipes.json");
    let words_path = tmp.path().join("word_freq.json");
    let bigrams_path = tmp.path().join("bigram_freq.json");

    let corpus = Corpus::from_recipes(vec![
        recipe(1, "Baked Chicken", "Chicken"),
        recipe(2, "Chicken Soup", "Soup"),
    ]);
    let (unigrams, bigrams) = ingest::build_frequency_tables(&corpus);
    corpus.save(&corpus_path).expect("save corpus");
    unigrams.save(&words_path).expect("save words");
    bigrams.save(&bigrams_path).expect("save bigrams");

    let corpus = Corpus::load(&corpus_path).expect("load corpus");
    let unigrams = FrequencyTable::load(&words_path).expect("load words");
    let bigrams = FrequencyTable::load(&bigrams_path).expect("load bigrams");
    assert!(unigrams.contains("chicken"));
    assert!(unigrams.count("chicken") >= 2);

    let corrector = SpellCorrector::new(unigrams, bigrams, PhraseOverrides::common_recipe_typos());
    let engine = RecipeEngine::new(corpus, corrector, Recommender::new(ScoringWeights::default(), None));
    let response = engine.correct_and_search("baked chiken", 1, 10);
    assert_eq!(response.corrected_query.as_deref(), Some("baked chicken"));
    assert_eq!(response.total_results, 1);
}
