use thiserror::Error;

/// Errors raised by the local menu cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Menu cache database error: {0}")]
    Database(#[from] sqlx::Error),
}
