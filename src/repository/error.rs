use thiserror::Error;

use crate::cache::CacheError;
use crate::network::NetworkError;

/// Errors that can occur while refreshing the menu.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}
