use crate::domain::{Cart, CartLine};

/// What was ordered at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub total: i64,
}

impl From<&Cart> for OrderReceipt {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}
