use std::env;
use std::path::PathBuf;

use rand::thread_rng;
use recipe_core::config::{expand_path, Config};
use recipe_core::corpus::Corpus;
use recipe_core::freq::FrequencyTable;
use recipe_core::ingest;
use recipe_core::traits::MemoryBookmarkStore;
use recipe_engine::RecipeEngine;
use recipe_recommend::{load_ranking_model, Recommender, ScoringWeights};
use recipe_spell::{PhraseOverrides, SpellCorrector};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <ingest|search|recommend> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn data_path(config: &Config, key: &str, default: &str) -> PathBuf {
    expand_path(config.get_or::<String>(key, default.to_string()))
}

fn load_engine(config: &Config) -> anyhow::Result<RecipeEngine> {
    let corpus = Corpus::load(&data_path(config, "data.recipes_snapshot", "data/preprocessed_recipes.json"))?;
    let unigrams = FrequencyTable::load(&data_path(config, "data.word_freq", "data/word_freq.json"))?;
    let bigrams = FrequencyTable::load(&data_path(config, "data.bigram_freq", "data/bigram_freq.json"))?;
    let corrector = SpellCorrector::new(unigrams, bigrams, PhraseOverrides::common_recipe_typos());
    let model = load_ranking_model(&data_path(config, "data.ranking_model", "data/ranking_model.json"));
    let weights: ScoringWeights = config.get_or("recommend", ScoringWeights::default());
    Ok(RecipeEngine::new(corpus, corrector, Recommender::new(weights, model)))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "ingest" => {
            let dump = args.get(0).map(PathBuf::from).unwrap_or_else(|| {
                data_path(&config, "data.raw_recipe_dump", "data/recipes.csv")
            });
            println!("Ingesting from {}", dump.display());
            let recipes = ingest::read_csv_dump(&dump)?;
            let corpus = Corpus::from_recipes(recipes);
            let (unigrams, bigrams) = ingest::build_frequency_tables(&corpus);
            corpus.save(&data_path(&config, "data.recipes_snapshot", "data/preprocessed_recipes.json"))?;
            unigrams.save(&data_path(&config, "data.word_freq", "data/word_freq.json"))?;
            bigrams.save(&data_path(&config, "data.bigram_freq", "data/bigram_freq.json"))?;
            println!(
                "✅ Ingest complete ({} recipes, {} words, {} bigrams)",
                corpus.len(),
                unigrams.len(),
                bigrams.len()
            );
        }
        "search" => {
            let query = args.get(0).cloned().unwrap_or_else(|| {
                eprintln!("Usage: recipe-cli search \"<query>\" [page] [limit]");
                std::process::exit(1)
            });
            let page = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(1);
            let limit = args.get(2).and_then(|a| a.parse().ok()).unwrap_or(20);
            let engine = load_engine(&config)?;
            let response = engine.correct_and_search(&query, page, limit);
            if let Some(corrected) = &response.corrected_query {
                println!("Did you mean: {} (suggestions: {:?})", corrected, response.suggestions);
            }
            println!(
                "{} results (page {}/{})",
                response.total_results, response.current_page, response.total_pages
            );
            for recipe in &response.recipes {
                println!("  [{}] {}", recipe.id, recipe.name);
            }
        }
        "recommend" => {
            let user = args.get(0).and_then(|a| a.parse().ok()).unwrap_or_else(|| {
                eprintln!("Usage: recipe-cli recommend <user_id> [limit] [folder_id]");
                std::process::exit(1)
            });
            let limit = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(10);
            let folder = args.get(2).and_then(|a| a.parse().ok());
            let engine = load_engine(&config)?;
            let bookmarks_path = data_path(&config, "data.bookmarks", "data/bookmarks.json");
            let store = if bookmarks_path.exists() {
                MemoryBookmarkStore::load(&bookmarks_path)?
            } else {
                eprintln!("No bookmark snapshot at {}; assuming none", bookmarks_path.display());
                MemoryBookmarkStore::default()
            };
            let response = engine.recommend(&store, user, folder, limit, &mut thread_rng())?;
            println!("{}", response.message);
            for recipe in &response.recommendations {
                println!("  [{}] {}", recipe.id, recipe.name);
            }
            for summary in &response.folder_summaries {
                println!(
                    "  folder {}: {} bookmarks, avg rating {:.1}, keywords {:?}",
                    summary.folder_id, summary.num_bookmarks, summary.avg_rating, summary.keywords
                );
            }
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}
