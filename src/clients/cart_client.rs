use tokio::sync::watch;
use tracing::{debug, instrument};

use crate::actor_framework::StateClient;
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::domain::{Cart, CartLine, MenuItem};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: StateClient<Cart>,
}

impl CartClient {
    pub fn new(inner: StateClient<Cart>) -> Self {
        Self { inner }
    }

    /// Returns the line's quantity after the add.
    #[instrument(skip(self, item), fields(item_id = item.id))]
    pub async fn add_to_cart(&self, item: MenuItem, quantity: u32) -> Result<u32, CartError> {
        debug!("Sending request");
        match self.inner.perform_action(CartAction::Add { item, quantity }).await? {
            Ok(CartActionResult::Added { quantity }) => Ok(quantity),
            Ok(_) => Err(CartError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(e),
        }
    }

    /// Returns whether a line was removed.
    #[instrument(skip(self, line), fields(item_id = line.menu_item.id))]
    pub async fn remove_from_cart(&self, line: &CartLine) -> Result<bool, CartError> {
        debug!("Sending request");
        let action = CartAction::Remove { menu_item_id: line.menu_item.id };
        match self.inner.perform_action(action).await? {
            Ok(CartActionResult::Removed(removed)) => Ok(removed.is_some()),
            Ok(_) => Err(CartError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(e),
        }
    }

    /// Returns how many lines were dropped.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<usize, CartError> {
        debug!("Sending request");
        match self.inner.perform_action(CartAction::Clear).await? {
            Ok(CartActionResult::Cleared(count)) => Ok(count),
            Ok(_) => Err(CartError::ActorCommunicationError("Unexpected result".to_string())),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    pub async fn cart(&self) -> Result<Cart, CartError> {
        debug!("Sending request");
        Ok(self.inner.snapshot().await?)
    }

    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.subscribe()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown request");
        Ok(self.inner.shutdown().await?)
    }
}
