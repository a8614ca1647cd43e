use thiserror::Error;

use crate::cache::CacheError;
use crate::preferences::PreferencesError;

/// Errors that stop the system from starting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to open menu cache: {0}")]
    Cache(#[from] CacheError),
    #[error("Failed to open preferences: {0}")]
    Preferences(#[from] PreferencesError),
}
