use tracing::{debug, warn};

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::actor_framework::State;
use crate::domain::Cart;

impl State for Cart {
    type Action = CartAction;
    type ActionResult = Result<CartActionResult, CartError>;

    /// Handles cart actions.
    ///
    /// # Actions
    /// - `Add`: merge-on-add by menu item id
    /// - `Remove`: drops the whole line
    /// - `Clear`: drops every line
    fn handle_action(&mut self, action: CartAction) -> Self::ActionResult {
        match action {
            CartAction::Add { item, quantity } => {
                let item_id = item.id;
                match self.add(item, quantity) {
                    Ok(quantity) => {
                        debug!(item_id, quantity, "Cart line updated");
                        Ok(CartActionResult::Added { quantity })
                    }
                    Err(e) => {
                        warn!(item_id, error = %e, "Rejected cart add");
                        Err(e)
                    }
                }
            }
            CartAction::Remove { menu_item_id } => Ok(CartActionResult::Removed(self.remove(menu_item_id))),
            CartAction::Clear => Ok(CartActionResult::Cleared(self.clear())),
        }
    }
}
