use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, Transaction};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, instrument, warn};

use super::{CacheError, MenuCache, MenuSnapshot};
use crate::domain::MenuItem;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS menu_items (
    id INTEGER PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    price INTEGER NOT NULL,
    image_url TEXT NOT NULL,
    category TEXT NOT NULL,
    position INTEGER NOT NULL
)";

const SELECT_ALL: &str =
    "SELECT id, title, description, price, image_url, category FROM menu_items ORDER BY position";

const SELECT_BY_CATEGORY: &str = "SELECT id, title, description, price, image_url, category \
     FROM menu_items WHERE category = ?1 ORDER BY position";

const INSERT_OR_REPLACE: &str = "INSERT OR REPLACE INTO menu_items \
     (id, title, description, price, image_url, category, position) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

const NEXT_POSITION: &str = "SELECT COALESCE(MAX(position) + 1, 0) FROM menu_items";

const DELETE_ALL: &str = "DELETE FROM menu_items";

/// SQLite-backed [`MenuCache`].
///
/// Writes are serialized so snapshots reach subscribers in commit order.
pub struct SqliteMenuCache {
    pool: SqlitePool,
    write_lock: Mutex<()>,
    publisher: watch::Sender<MenuSnapshot>,
}

impl SqliteMenuCache {
    /// Opens (creating if missing) the cache database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        info!(path = %path.as_ref().display(), "Menu cache opened");
        Self::from_pool(pool).await
    }

    /// A private in-memory database; contents are lost when the cache is dropped.
    pub async fn in_memory() -> Result<Self, CacheError> {
        let options: SqliteConnectOptions = "sqlite::memory:".parse()?;
        // Every connection to :memory: is a separate database, so keep exactly one alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, CacheError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        let initial = load_all(&pool).await?;
        debug!(item_count = initial.len(), "Loaded cached menu");
        let (publisher, _) = watch::channel(Arc::new(initial));
        Ok(Self {
            pool,
            write_lock: Mutex::new(()),
            publisher,
        })
    }

    /// Reloads the table and publishes it. Runs after a committed write, so a
    /// failed reload leaves subscribers on the previous snapshot instead of
    /// failing the write.
    async fn publish(&self) {
        match load_all(&self.pool).await {
            Ok(items) => {
                debug!(item_count = items.len(), "Publishing menu snapshot");
                self.publisher.send_replace(Arc::new(items));
            }
            Err(e) => warn!(error = %e, "Failed to reload menu snapshot after write"),
        }
    }
}

#[async_trait]
impl MenuCache for SqliteMenuCache {
    async fn all_items(&self) -> Result<Vec<MenuItem>, CacheError> {
        Ok(load_all(&self.pool).await?)
    }

    #[instrument(skip(self))]
    async fn items_by_category(&self, category: &str) -> Result<Vec<MenuItem>, CacheError> {
        let rows = sqlx::query(SELECT_BY_CATEGORY)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(item_from_row).collect::<Result<Vec<_>, sqlx::Error>>()?)
    }

    #[instrument(skip(self, items), fields(item_count = items.len()))]
    async fn insert_all(&self, items: &[MenuItem]) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;
        insert_rows(&mut tx, items).await?;
        tx.commit().await?;
        self.publish().await;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock().await;
        sqlx::query(DELETE_ALL).execute(&self.pool).await?;
        self.publish().await;
        Ok(())
    }

    #[instrument(skip(self, items), fields(item_count = items.len()))]
    async fn replace_all(&self, items: &[MenuItem]) -> Result<(), CacheError> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;
        sqlx::query(DELETE_ALL).execute(&mut *tx).await?;
        insert_rows(&mut tx, items).await?;
        tx.commit().await?;
        debug!("Menu cache replaced");
        self.publish().await;
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<MenuSnapshot> {
        self.publisher.subscribe()
    }
}

async fn load_all(pool: &SqlitePool) -> Result<Vec<MenuItem>, sqlx::Error> {
    let rows = sqlx::query(SELECT_ALL).fetch_all(pool).await?;
    rows.iter().map(item_from_row).collect()
}

async fn insert_rows(tx: &mut Transaction<'_, Sqlite>, items: &[MenuItem]) -> Result<(), sqlx::Error> {
    let start: i64 = sqlx::query_scalar(NEXT_POSITION).fetch_one(&mut **tx).await?;
    for (position, item) in (start..).zip(items) {
        sqlx::query(INSERT_OR_REPLACE)
            .bind(item.id)
            .bind(item.title.as_str())
            .bind(item.description.as_str())
            .bind(item.price)
            .bind(item.image_url.as_str())
            .bind(item.category.as_str())
            .bind(position)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

fn item_from_row(row: &SqliteRow) -> Result<MenuItem, sqlx::Error> {
    Ok(MenuItem {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        image_url: row.try_get("image_url")?,
        category: row.try_get("category")?,
    })
}
