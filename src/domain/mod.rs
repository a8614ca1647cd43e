pub mod cart;
pub mod form;
pub mod menu;
pub mod order;
pub mod user;

pub use cart::*;
pub use form::*;
pub use menu::*;
pub use order::*;
pub use user::*;
