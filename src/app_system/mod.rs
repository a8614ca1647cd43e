//! System orchestration, startup, and shutdown logic.

pub mod config;
pub mod error;
pub mod lemon_system;
pub mod tracing;

pub use config::*;
pub use error::*;
pub use lemon_system::*;
pub use self::tracing::*;
