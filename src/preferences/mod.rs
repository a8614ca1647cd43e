//! Persistence for the onboarding profile and logged-in flag.

mod error;
mod store;
mod user;

pub use error::PreferencesError;
pub use store::{PreferenceEditor, PreferenceStore};
pub use user::{UserPreferences, UserPreferencesRepository, USER_PREFERENCES_NAMESPACE};
