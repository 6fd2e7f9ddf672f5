use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of a catalog transform. No partial output is produced when
/// one of these is returned.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed catalog XML: {0}")]
    MalformedInput(String),

    #[error("invalid root element '{found}', expected 'cc'")]
    UnexpectedRoot { found: String },

    #[error("catalog input is {size} bytes, limit is {limit}")]
    InputTooLarge { size: usize, limit: usize },
}

impl CatalogError {
    pub(crate) fn malformed(position: u64, err: impl std::fmt::Display) -> Self {
        Self::MalformedInput(format!("{err} (at byte {position})"))
    }
}

/// Failures reported by a storage collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record '{0}' already exists")]
    Conflict(String),

    #[error("store backend failed: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
