//! Unigram and bigram frequency tables mined from the recipe corpus.
//!
//! One table type serves both arities: bigram keys are stored in their
//! space-joined form (`"olive oil"`), which is also the form candidate
//! generation compares edit distances against.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Token (or space-joined token pair) to occurrence count.
///
/// Every stored count is >= 1; zero-count entries are never materialized.
/// The total is summed once at construction, so probability lookups are a
/// single map access. An unseen key gets pseudo-count 1, i.e. probability
/// `1 / total`.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    total: u64,
}

impl FrequencyTable {
    pub fn new(counts: HashMap<String, u64>) -> Self {
        let total = counts.values().sum();
        Self { counts, total }
    }

    /// Load a table snapshot (JSON object of key -> count). Absent or
    /// empty tables are fatal at startup.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::MissingData(format!("{}: {}", path.display(), e)))?;
        let counts: HashMap<String, u64> =
            serde_json::from_str(&raw).map_err(|e| Error::Snapshot {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let table = Self::new(counts);
        if table.total == 0 {
            return Err(Error::MissingData(format!(
                "{}: frequency table is empty",
                path.display()
            )));
        }
        info!(path = %path.display(), entries = table.counts.len(), total = table.total, "loaded frequency table");
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let raw = serde_json::to_string(&self.counts)?;
        fs::write(path, raw)?;
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    /// Observed count, or the smoothing pseudo-count 1 for unseen keys.
    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(1)
    }

    pub fn probability(&self, key: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(key) as f64 / self.total as f64
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}
