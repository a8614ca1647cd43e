use thiserror::Error;

/// Errors that can occur while fetching the remote menu.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Menu request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Menu endpoint returned status {0}")]
    Status(u16),
    #[error("Menu document could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
