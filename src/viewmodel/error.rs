use thiserror::Error;

use crate::cart_actor::CartError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Cannot place an order with an empty cart")]
    EmptyCart,
    #[error(transparent)]
    Cart(#[from] CartError),
}
