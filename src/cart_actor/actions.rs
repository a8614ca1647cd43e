use crate::domain::{CartLine, MenuItem};

/// Custom actions for the Cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds `quantity` of `item`, merging into an existing line for the same id.
    ///
    /// # Errors
    /// Fails with `InvalidQuantity` when `quantity` is zero.
    Add { item: MenuItem, quantity: u32 },
    /// Removes the whole line for the menu item id.
    Remove { menu_item_id: i64 },
    /// Empties the cart.
    Clear,
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartActionResult {
    /// Quantity of the affected line after the add
    Added { quantity: u32 },
    /// The removed line, if one existed
    Removed(Option<CartLine>),
    /// Number of lines dropped
    Cleared(usize),
}
