use thiserror::Error;

/// Result type local to nestree-store.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for nestree_core::Error {
    fn from(e: StoreError) -> Self {
        nestree_core::Error::Store(e.to_string())
    }
}
