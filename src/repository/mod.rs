//! Menu repository: reconciles the remote source with the local cache.

mod error;
mod feed;
mod menu_repository;

pub use error::RepositoryError;
pub use feed::MenuFeed;
pub use menu_repository::{MenuFetch, MenuRepository};
