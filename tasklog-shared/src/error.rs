/// Storage error types
///
/// Every `TaskStore` implementation reports failures through `StoreError`.
/// "Not found" is not an error at this layer: lookups return `Option` and
/// deletes return `bool`, so callers decide what absence means.
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same unique key already exists
    #[error("{entity} already exists: {key}")]
    AlreadyExists {
        entity: &'static str,
        key: String,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Creates an already-exists error
    pub fn already_exists(entity: &'static str, key: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            key: key.into(),
        }
    }
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;
