//! recipe-engine
//!
//! Facade wiring the spelling corrector, text index and recommender over
//! one read-only corpus. Constructed once at startup; every public
//! operation takes `&self` and shares the loaded state across requests.

use anyhow::Result;
use rand::Rng;
use recipe_core::corpus::Corpus;
use recipe_core::error::Error;
use recipe_core::traits::BookmarkStore;
use recipe_core::types::{FolderId, Recipe, RecipeId, UserId};
use recipe_recommend::{folder_summary, FolderSummary, Recommender};
use recipe_search::{paginate, TextIndex};
use recipe_spell::SpellCorrector;
use std::collections::HashSet;
use tracing::info;

/// Response of `correct_and_search`. `corrected_query` is `None` when
/// the corrected form equals the raw query.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub recipes: Vec<Recipe>,
    pub original_query: String,
    pub corrected_query: Option<String>,
    pub suggestions: Vec<String>,
    pub total_results: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

#[derive(Debug, Clone)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recipe>,
    pub total_recommendations: usize,
    pub folder_summaries: Vec<FolderSummary>,
    pub message: String,
}

/// Process-wide engine over the loaded corpus, frequency tables and
/// optional ranking model.
pub struct RecipeEngine {
    corpus: Corpus,
    corrector: SpellCorrector,
    index: TextIndex,
    recommender: Recommender,
}

impl RecipeEngine {
    pub fn new(corpus: Corpus, corrector: SpellCorrector, recommender: Recommender) -> Self {
        let index = TextIndex::build(corpus.iter());
        info!(
            recipes = corpus.len(),
            vocabulary = corrector.unigrams().len(),
            model = recommender.has_model(),
            "recipe engine ready"
        );
        Self { corpus, corrector, index, recommender }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Correct `raw_query` and return the matching page of recipes. An
    /// empty query skips correction and pages through the whole corpus.
    pub fn correct_and_search(&self, raw_query: &str, page: usize, limit: usize) -> SearchResponse {
        let trimmed = raw_query.trim();
        let correction = if trimmed.is_empty() {
            None
        } else {
            Some(self.corrector.correct(trimmed))
        };
        let ids = match &correction {
            Some(c) => self.index.search(&c.corrected),
            None => self.index.search(""),
        };

        let page_data = paginate(&ids, page, limit);
        let recipes = page_data
            .items
            .iter()
            .filter_map(|id| self.corpus.get(*id))
            .cloned()
            .collect();

        let (corrected_query, suggestions) = match correction {
            Some(c) if c.corrected != trimmed => (Some(c.corrected), c.suggestions),
            Some(c) => (None, c.suggestions),
            None => (None, Vec::new()),
        };
        SearchResponse {
            recipes,
            original_query: trimmed.to_string(),
            corrected_query,
            suggestions,
            total_results: page_data.total_results,
            total_pages: page_data.total_pages,
            current_page: page_data.current_page,
        }
    }

    /// Recommend up to `limit` recipes the user has not bookmarked.
    ///
    /// The profile is built from the folder scope when given, while the
    /// exclusion set always covers every bookmark the user owns. A
    /// folder scope with no bookmarks is reported as
    /// `Error::FolderNotFound`.
    pub fn recommend<R: Rng>(
        &self,
        store: &dyn BookmarkStore,
        user: UserId,
        folder: Option<FolderId>,
        limit: usize,
        rng: &mut R,
    ) -> Result<RecommendResponse> {
        let scoped = store.bookmarks_for(user, folder)?;
        if let Some(folder_id) = folder {
            if scoped.is_empty() {
                return Err(Error::FolderNotFound(folder_id).into());
            }
        }
        let all_bookmarks = if folder.is_some() {
            store.bookmarks_for(user, None)?
        } else {
            scoped.clone()
        };
        let excluded: HashSet<RecipeId> = all_bookmarks.iter().map(|b| b.recipe_id).collect();

        let mut folder_summaries = Vec::new();
        for folder_id in store.folders_for(user)? {
            let folder_bookmarks = store.bookmarks_for(user, Some(folder_id))?;
            folder_summaries.push(folder_summary(&self.corpus, folder_id, &folder_bookmarks));
        }

        let recommendations = self
            .recommender
            .recommend(&self.corpus, &scoped, &excluded, limit, rng);
        info!(
            user,
            ?folder,
            bookmarks = scoped.len(),
            recommended = recommendations.len(),
            "generated recommendations"
        );

        let pool_exhausted = self.corpus.iter().all(|r| excluded.contains(&r.id));
        let message = if pool_exhausted {
            "Every recipe is already bookmarked.".to_string()
        } else if folder.is_some() {
            "Suggestions generated based on folder contents.".to_string()
        } else if !scoped.is_empty() {
            "Suggestions based on all bookmarks.".to_string()
        } else {
            "Random suggestions due to lack of bookmarks.".to_string()
        };

        Ok(RecommendResponse {
            total_recommendations: recommendations.len(),
            recommendations,
            folder_summaries,
            message,
        })
    }
}
