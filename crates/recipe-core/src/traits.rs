use crate::types::{Bookmark, FolderId, UserId};

/// Length of the ranking feature vector: keyword overlap, rating
/// distance, category match, review count, total time in minutes.
pub const FEATURE_LEN: usize = 5;

/// Read-only view of the folder/bookmark collaborator.
pub trait BookmarkStore: Send + Sync {
    /// Bookmarks for `user`, optionally scoped to a single folder.
    fn bookmarks_for(&self, user: UserId, folder: Option<FolderId>)
        -> anyhow::Result<Vec<Bookmark>>;

    /// Folder ids owned by `user`, in creation order.
    fn folders_for(&self, user: UserId) -> anyhow::Result<Vec<FolderId>>;
}

/// Pre-trained relevance model: fixed-length feature vectors in, one
/// score per vector out. Loaded once at startup when the artifact exists;
/// absence is a normal state handled by the heuristic fallback.
pub trait RankingModel: Send + Sync {
    fn score_batch(&self, features: &[[f64; FEATURE_LEN]]) -> anyhow::Result<Vec<f64>>;
}

/// In-memory bookmark store backing tests and the CLI.
#[derive(Debug, Default)]
pub struct MemoryBookmarkStore {
    bookmarks: Vec<Bookmark>,
}

impl MemoryBookmarkStore {
    pub fn new(bookmarks: Vec<Bookmark>) -> Self {
        Self { bookmarks }
    }

    pub fn insert(&mut self, bookmark: Bookmark) {
        self.bookmarks.push(bookmark);
    }

    /// Load bookmarks from a JSON array snapshot.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::new(serde_json::from_str(&raw)?))
    }
}

impl BookmarkStore for MemoryBookmarkStore {
    fn bookmarks_for(
        &self,
        user: UserId,
        folder: Option<FolderId>,
    ) -> anyhow::Result<Vec<Bookmark>> {
        Ok(self
            .bookmarks
            .iter()
            .filter(|b| b.user_id == user && folder.map_or(true, |f| b.folder_id == f))
            .copied()
            .collect())
    }

    fn folders_for(&self, user: UserId) -> anyhow::Result<Vec<FolderId>> {
        let mut folders = Vec::new();
        for b in self.bookmarks.iter().filter(|b| b.user_id == user) {
            if !folders.contains(&b.folder_id) {
                folders.push(b.folder_id);
            }
        }
        Ok(folders)
    }
}
