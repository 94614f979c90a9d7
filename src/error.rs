use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the catalog layer.
///
/// Only the load and registration steps can fail. Once a `Recommender` is
/// built it is purely computational and has no error path; commands and the
/// server wrap these in `anyhow` for context chains.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to open catalog at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("catalog query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("invalid skill name {0:?}: empty after trimming")]
    InvalidSkillName(String),

    #[error("failed to encode skill references: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
