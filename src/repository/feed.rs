use tokio::sync::watch;

use crate::cache::MenuSnapshot;
use crate::domain::MenuItem;

/// Live read of the cached menu, optionally narrowed to one category.
///
/// A new feed holds the latest snapshot immediately; [`MenuFeed::changed`]
/// resolves on every subsequent cache write.
#[derive(Debug, Clone)]
pub struct MenuFeed {
    receiver: watch::Receiver<MenuSnapshot>,
    category: Option<String>,
}

impl MenuFeed {
    pub fn new(receiver: watch::Receiver<MenuSnapshot>) -> Self {
        Self {
            receiver,
            category: None,
        }
    }

    /// Narrows the feed to items whose category matches case-insensitively.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn current(&self) -> Vec<MenuItem> {
        self.select(&self.receiver.borrow())
    }

    /// Waits for the next cache write and returns the new contents.
    ///
    /// Returns `None` once the cache has been dropped.
    pub async fn changed(&mut self) -> Option<Vec<MenuItem>> {
        self.receiver.changed().await.ok()?;
        let snapshot = self.receiver.borrow_and_update().clone();
        Some(self.select(&snapshot))
    }

    fn select(&self, snapshot: &MenuSnapshot) -> Vec<MenuItem> {
        match &self.category {
            Some(category) => snapshot
                .iter()
                .filter(|item| item.in_category(category))
                .cloned()
                .collect(),
            None => snapshot.to_vec(),
        }
    }
}
