use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, instrument};

use super::{MenuFeed, RepositoryError};
use crate::cache::MenuCache;
use crate::domain::MenuItem;
use crate::network::MenuService;

/// Single source of truth for menu data.
#[async_trait]
pub trait MenuFetch: Send + Sync {
    /// Live read of every cached item, in insertion order.
    fn menu_items(&self) -> MenuFeed;

    /// Fetches the full menu and replaces the cache with it.
    ///
    /// Returns the number of items now cached. On failure the cache is left
    /// untouched.
    async fn refresh_menu(&self) -> Result<usize, RepositoryError>;

    /// Live read narrowed to a category, matched case-insensitively.
    fn menu_items_by_category(&self, category: &str) -> MenuFeed {
        self.menu_items().with_category(category)
    }
}

/// [`MenuFetch`] over a remote [`MenuService`] and a local [`MenuCache`].
#[derive(Clone)]
pub struct MenuRepository {
    service: Arc<dyn MenuService>,
    cache: Arc<dyn MenuCache>,
}

impl MenuRepository {
    pub fn new(service: Arc<dyn MenuService>, cache: Arc<dyn MenuCache>) -> Self {
        Self { service, cache }
    }
}

#[async_trait]
impl MenuFetch for MenuRepository {
    fn menu_items(&self) -> MenuFeed {
        MenuFeed::new(self.cache.subscribe())
    }

    #[instrument(name = "refresh_menu", skip(self))]
    async fn refresh_menu(&self) -> Result<usize, RepositoryError> {
        info!("Starting menu refresh from network");

        let document = self.service.get_all_menu_items().await.map_err(|e| {
            error!(error = %e, "Network call failed");
            e
        })?;

        let items: Vec<MenuItem> = document.menu.into_iter().map(MenuItem::from).collect();
        debug!(item_count = items.len(), "Network call successful");

        self.cache.replace_all(&items).await?;
        info!(item_count = items.len(), "Menu items saved to cache");
        Ok(items.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::cache::SqliteMenuCache;
    use crate::network::{MenuDocument, MenuItemDto, NetworkError};

    /// Serves a fixed document until told to fail.
    struct StubMenuService {
        document: MenuDocument,
        failing: AtomicBool,
    }

    impl StubMenuService {
        fn new(dtos: Vec<MenuItemDto>) -> Self {
            Self {
                document: MenuDocument { menu: dtos },
                failing: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl MenuService for StubMenuService {
        async fn get_all_menu_items(&self) -> Result<MenuDocument, NetworkError> {
            if self.failing.load(Ordering::SeqCst) {
                let err = serde_json::from_str::<MenuDocument>("not json").unwrap_err();
                return Err(NetworkError::Decode(err));
            }
            Ok(self.document.clone())
        }
    }

    fn dto(id: i64, title: &str, category: &str) -> MenuItemDto {
        MenuItemDto {
            id,
            title: title.to_string(),
            description: format!("{title} description"),
            price: 10,
            image_url: format!("{id}.jpg"),
            category: category.to_string(),
        }
    }

    fn four_items() -> Vec<MenuItemDto> {
        vec![
            dto(1, "Greek Salad", "Starters"),
            dto(2, "Bruschetta", "Starters"),
            dto(3, "Grilled Fish", "Mains"),
            dto(4, "Lemon Dessert", "Desserts"),
        ]
    }

    async fn repository(service: Arc<StubMenuService>) -> MenuRepository {
        let cache = Arc::new(SqliteMenuCache::in_memory().await.unwrap());
        MenuRepository::new(service, cache)
    }

    #[tokio::test]
    async fn test_refresh_populates_feed() {
        let repo = repository(Arc::new(StubMenuService::new(four_items()))).await;
        let mut feed = repo.menu_items();
        assert!(feed.current().is_empty());

        assert_eq!(repo.refresh_menu().await.unwrap(), 4);

        let items = feed.changed().await.unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_refresh_is_idempotent() {
        let repo = repository(Arc::new(StubMenuService::new(four_items()))).await;

        repo.refresh_menu().await.unwrap();
        let first = repo.menu_items().current();
        repo.refresh_menu().await.unwrap();
        let second = repo.menu_items().current();

        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_cache() {
        let service = Arc::new(StubMenuService::new(four_items()));
        let repo = repository(service.clone()).await;
        repo.refresh_menu().await.unwrap();

        service.failing.store(true, Ordering::SeqCst);
        let err = repo.refresh_menu().await.unwrap_err();

        assert!(matches!(err, RepositoryError::Network(NetworkError::Decode(_))));
        assert_eq!(repo.menu_items().current().len(), 4);
    }

    #[tokio::test]
    async fn test_category_feed_is_case_insensitive() {
        let service = Arc::new(StubMenuService::new(vec![dto(1, "Soup", "Starters"), dto(2, "Steak", "Mains")]));
        let repo = repository(service).await;
        repo.refresh_menu().await.unwrap();

        let starters = repo.menu_items_by_category("starters").current();
        assert_eq!(starters.len(), 1);
        assert_eq!(starters[0].title, "Soup");
    }
}
