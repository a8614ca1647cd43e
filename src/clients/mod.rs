//! Typed client handles over the actors.

mod cart_client;

pub use cart_client::CartClient;
