//! Cart-specific domain logic run inside a [`StateActor`](crate::actor_framework::StateActor).

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
