use crate::types::FolderId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing corpus data: {0}")]
    MissingData(String),

    #[error("Malformed snapshot {path}: {reason}")]
    Snapshot { path: String, reason: String },

    #[error("Folder {0} is empty or not found")]
    FolderNotFound(FolderId),
}

pub type Result<T> = std::result::Result<T, Error>;
