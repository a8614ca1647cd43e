use std::sync::Arc;

use tracing::{error, info, instrument};

use super::{AppConfig, AppError};
use crate::actor_framework::StateActor;
use crate::cache::SqliteMenuCache;
use crate::clients::CartClient;
use crate::domain::Cart;
use crate::network::HttpMenuService;
use crate::preferences::{PreferenceStore, UserPreferencesRepository, USER_PREFERENCES_NAMESPACE};
use crate::repository::MenuRepository;
use crate::viewmodel::MainViewModel;

/// The composition root: builds every collaborator explicitly and owns the
/// spawned actor tasks.
pub struct LemonSystem {
    pub view_model: MainViewModel,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl LemonSystem {
    /// Create and start the whole system.
    ///
    /// **Startup Order:**
    /// 1. Open the local stores (menu cache, preferences)
    /// 2. Wire the repository over the remote source and the cache
    /// 3. Start the cart actor and hand its client to the view model
    #[instrument(name = "lemon_system", skip(config), fields(menu_url = %config.menu_url))]
    pub async fn start(config: AppConfig) -> Result<Self, AppError> {
        info!("Starting Little Lemon system");

        let cache = Arc::new(SqliteMenuCache::open(&config.database_path).await?);
        let store = PreferenceStore::open(&config.preferences_dir, USER_PREFERENCES_NAMESPACE)?;
        let preferences = Arc::new(UserPreferencesRepository::new(store));

        let service = Arc::new(HttpMenuService::new(config.menu_url));
        let repository = Arc::new(MenuRepository::new(service, cache));

        let (cart_actor, cart_client) = StateActor::new(config.channel_buffer, Cart::new());
        let handles = vec![tokio::spawn(cart_actor.run())];

        let view_model = MainViewModel::new(preferences, repository, CartClient::new(cart_client));

        info!("Little Lemon system started successfully");
        Ok(Self { view_model, handles })
    }

    /// Stops background work, then waits for every actor task.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down Little Lemon system");

        self.view_model.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete");
        Ok(())
    }
}
