use async_trait::async_trait;
use tracing::{debug, error, instrument};

use super::dto::{MenuDocument, MenuItemDto};
use super::error::NetworkError;

pub const DEFAULT_MENU_URL: &str =
    "https://raw.githubusercontent.com/Meta-Mobile-Developer-PC/Working-With-Data-API/main/menu.json";

/// Source of the full menu document.
#[async_trait]
pub trait MenuService: Send + Sync {
    async fn get_all_menu_items(&self) -> Result<MenuDocument, NetworkError>;

    /// Client-side filter over the full fetch, matching category case-insensitively.
    async fn get_menu_items_by_category(&self, category: &str) -> Result<Vec<MenuItemDto>, NetworkError> {
        let category = category.to_lowercase();
        let document = self.get_all_menu_items().await?;
        Ok(document
            .menu
            .into_iter()
            .filter(|item| item.category.to_lowercase() == category)
            .collect())
    }
}

/// Fetches the menu with one HTTP GET against a fixed URL.
#[derive(Clone)]
pub struct HttpMenuService {
    client: reqwest::Client,
    url: String,
}

impl HttpMenuService {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl MenuService for HttpMenuService {
    /// The endpoint serves JSON as `text/plain`, so the body is decoded
    /// regardless of the declared content type.
    #[instrument(skip(self), fields(url = %self.url))]
    async fn get_all_menu_items(&self) -> Result<MenuDocument, NetworkError> {
        debug!("Sending request");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "Menu endpoint rejected request");
            return Err(NetworkError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let document: MenuDocument = serde_json::from_str(&body)?;
        debug!(item_count = document.menu.len(), "Menu document decoded");
        Ok(document)
    }
}
