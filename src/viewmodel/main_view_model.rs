use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

use super::{CheckoutError, OnboardingViewModel, WorkScope};
use crate::cart_actor::CartError;
use crate::clients::CartClient;
use crate::domain::{display_categories, Cart, CartLine, MenuItem, MenuItemLookup, MenuQuery, OrderReceipt};
use crate::preferences::UserPreferences;
use crate::repository::{MenuFeed, MenuFetch};

/// Top-level view model: menu browsing, the cart and checkout, plus the
/// onboarding flow.
///
/// The cart is owned here; nothing else mutates it.
pub struct MainViewModel {
    onboarding: OnboardingViewModel,
    repository: Arc<dyn MenuFetch>,
    cart: CartClient,
    search_phrase: watch::Sender<String>,
    selected_category: watch::Sender<Option<String>>,
    loading: Arc<LoadingState>,
    scope: WorkScope,
}

impl MainViewModel {
    pub fn new(
        preferences: Arc<dyn UserPreferences>,
        repository: Arc<dyn MenuFetch>,
        cart: CartClient,
    ) -> Self {
        Self {
            onboarding: OnboardingViewModel::new(preferences),
            repository,
            cart,
            search_phrase: watch::channel(String::new()).0,
            selected_category: watch::channel(None).0,
            loading: Arc::new(LoadingState::default()),
            scope: WorkScope::new(),
        }
    }

    pub fn onboarding(&self) -> &OnboardingViewModel {
        &self.onboarding
    }

    // --- Menu ---

    /// Refreshes the menu in the background.
    ///
    /// Failures are logged and the cached menu stays as it was. Overlapping
    /// refreshes each replace the whole cache, so the last to commit wins;
    /// `is_loading` stays set until every one of them has finished. Must be
    /// called from within a Tokio runtime.
    pub fn refresh_menu_items(&self) -> JoinHandle<()> {
        let repository = self.repository.clone();
        let loading = LoadingGuard::start(self.loading.clone());

        self.scope.spawn("refresh_menu", async move {
            let _loading = loading;
            debug!("Starting menu refresh");
            match repository.refresh_menu().await {
                Ok(item_count) => info!(item_count, "Menu refresh completed successfully"),
                Err(e) => error!(error = %e, "Menu refresh failed"),
            }
        })
    }

    pub fn is_loading(&self) -> watch::Receiver<bool> {
        self.loading.flag.subscribe()
    }

    pub fn menu_items(&self) -> MenuFeed {
        self.repository.menu_items()
    }

    pub fn menu_items_by_category(&self, category: &str) -> MenuFeed {
        self.repository.menu_items_by_category(category)
    }

    pub fn menu_item(&self, id: i64) -> MenuItemLookup {
        MenuItemLookup::find(&self.menu_items().current(), id)
    }

    pub fn categories(&self) -> Vec<String> {
        display_categories(&self.menu_items().current())
    }

    pub fn update_search_phrase(&self, phrase: impl Into<String>) {
        self.search_phrase.send_replace(phrase.into());
    }

    pub fn search_phrase(&self) -> watch::Receiver<String> {
        self.search_phrase.subscribe()
    }

    /// Selects `category`, or clears the selection if it is already selected.
    pub fn select_category(&self, category: &str) {
        let category = category.to_owned();
        self.selected_category.send_modify(|selected| {
            let same = selected
                .as_deref()
                .is_some_and(|current| current.to_lowercase() == category.to_lowercase());
            *selected = if same { None } else { Some(category) };
        });
    }

    pub fn selected_category(&self) -> watch::Receiver<Option<String>> {
        self.selected_category.subscribe()
    }

    /// The cached menu narrowed by the search phrase and selected category.
    pub fn visible_menu(&self) -> Vec<MenuItem> {
        let query = MenuQuery {
            search_phrase: self.search_phrase.borrow().clone(),
            category: self.selected_category.borrow().clone(),
        };
        query.apply(&self.menu_items().current())
    }

    // --- Cart ---

    pub async fn add_to_cart(&self, item: MenuItem, quantity: u32) -> Result<u32, CartError> {
        self.cart.add_to_cart(item, quantity).await
    }

    pub async fn remove_from_cart(&self, line: &CartLine) -> Result<bool, CartError> {
        self.cart.remove_from_cart(line).await
    }

    pub async fn clear_cart(&self) -> Result<usize, CartError> {
        self.cart.clear_cart().await
    }

    pub fn cart_items(&self) -> watch::Receiver<Cart> {
        self.cart.subscribe()
    }

    pub fn cart_item_count(&self) -> u64 {
        self.cart.subscribe().borrow().item_count()
    }

    pub fn cart_total(&self) -> i64 {
        self.cart.subscribe().borrow().total()
    }

    /// Checks out the current cart and empties it.
    #[instrument(skip(self))]
    pub async fn place_order(&self) -> Result<OrderReceipt, CheckoutError> {
        let cart = self.cart.cart().await?;
        if cart.is_empty() {
            warn!("Order rejected: cart is empty");
            return Err(CheckoutError::EmptyCart);
        }

        let receipt = OrderReceipt::from(&cart);
        self.cart.clear_cart().await?;
        info!(item_count = receipt.item_count, total = receipt.total, "Order placed");
        Ok(receipt)
    }

    // --- Lifecycle ---

    /// Cancels background work and stops the cart actor.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) {
        self.scope.shutdown().await;
        if let Err(e) = self.cart.shutdown().await {
            warn!(error = %e, "Cart actor already stopped");
        }
        info!("MainViewModel shut down");
    }
}

/// Number of refreshes in flight, mirrored as a flag for observers.
struct LoadingState {
    in_flight: Mutex<usize>,
    flag: watch::Sender<bool>,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            in_flight: Mutex::new(0),
            flag: watch::channel(false).0,
        }
    }
}

impl LoadingState {
    fn adjust(&self, apply: impl FnOnce(&mut usize)) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        apply(&mut *in_flight);
        let loading = *in_flight > 0;
        self.flag.send_if_modified(|current| std::mem::replace(current, loading) != loading);
    }
}

/// Counts one refresh as in flight until dropped, including when the refresh
/// is cancelled.
struct LoadingGuard(Arc<LoadingState>);

impl LoadingGuard {
    fn start(state: Arc<LoadingState>) -> Self {
        state.adjust(|n| *n += 1);
        Self(state)
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.adjust(|n| *n = n.saturating_sub(1));
    }
}
