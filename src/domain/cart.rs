use crate::cart_actor::CartError;
use crate::domain::MenuItem;

/// A menu item and how many of it are in the active order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub menu_item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    /// Saturates at the `i64` bounds.
    pub fn subtotal(&self) -> i64 {
        self.menu_item.price.saturating_mul(i64::from(self.quantity))
    }
}

/// The active order.
///
/// Holds at most one line per menu item id; adding an item that is already
/// present increases the quantity of its line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds `quantity` of `item`, merging into an existing line.
    ///
    /// Returns the resulting quantity of the line.
    ///
    /// # Errors
    /// `CartError::InvalidQuantity` when `quantity` is zero.
    pub fn add(&mut self, item: MenuItem, quantity: u32) -> Result<u32, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        match self.lines.iter_mut().find(|line| line.menu_item.id == item.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity);
                Ok(line.quantity)
            }
            None => {
                self.lines.push(CartLine { menu_item: item, quantity });
                Ok(quantity)
            }
        }
    }

    /// Removes the whole line for `menu_item_id`, if any.
    pub fn remove(&mut self, menu_item_id: i64) -> Option<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|line| line.menu_item.id == menu_item_id)?;
        Some(self.lines.remove(index))
    }

    /// Empties the cart, returning how many lines were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.lines.len();
        self.lines.clear();
        count
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Saturates at the `i64` bounds, like [`CartLine::subtotal`].
    pub fn total(&self) -> i64 {
        self.lines
            .iter()
            .map(CartLine::subtotal)
            .fold(0, i64::saturating_add)
    }
}
