//! recipe-recommend
//!
//! Ranks unbookmarked recipes for a user: taste profile from bookmark
//! history, feature extraction, a heuristic scoring policy, an optional
//! learned ranking model, and the explore/category/ranked composition.

pub mod features;
pub mod model;
pub mod profile;
pub mod recommend;
pub mod scorer;

pub use model::{load_ranking_model, LinearRankingModel};
pub use profile::TasteProfile;
pub use recommend::{folder_summary, FolderSummary, Recommender};
pub use scorer::ScoringWeights;
