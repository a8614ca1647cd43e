//! Local menu cache: the persistent table plus a live view of its contents.

mod error;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::domain::MenuItem;

pub use error::CacheError;
pub use sqlite::SqliteMenuCache;

/// Snapshot of the cached items, in insertion order.
pub type MenuSnapshot = Arc<Vec<MenuItem>>;

/// Persistent menu table.
///
/// Every successful write is followed by a new [`MenuSnapshot`] on the
/// channel returned by [`MenuCache::subscribe`].
#[async_trait]
pub trait MenuCache: Send + Sync {
    async fn all_items(&self) -> Result<Vec<MenuItem>, CacheError>;

    /// Exact, case-sensitive match on the stored category.
    async fn items_by_category(&self, category: &str) -> Result<Vec<MenuItem>, CacheError>;

    /// Inserts `items`, replacing rows that share an id.
    async fn insert_all(&self, items: &[MenuItem]) -> Result<(), CacheError>;

    async fn delete_all(&self) -> Result<(), CacheError>;

    /// Deletes every row and inserts `items` as one transaction.
    ///
    /// An `Err` means nothing was committed.
    async fn replace_all(&self, items: &[MenuItem]) -> Result<(), CacheError>;

    fn subscribe(&self) -> watch::Receiver<MenuSnapshot>;
}
