//! Remote menu source.

mod dto;
mod error;
mod service;

pub use dto::{MenuDocument, MenuItemDto};
pub use error::NetworkError;
pub use service::{HttpMenuService, MenuService, DEFAULT_MENU_URL};
