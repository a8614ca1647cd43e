use thiserror::Error;

/// Errors that can occur while opening a preference namespace.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Preferences file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
