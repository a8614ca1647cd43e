use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        Self::ActorCommunicationError(e.to_string())
    }
}
