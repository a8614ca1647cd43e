use tracing::{debug, instrument};

use super::PreferenceStore;
use crate::domain::UserProfile;

pub const USER_PREFERENCES_NAMESPACE: &str = "UserPrefs";

const KEY_FIRST_NAME: &str = "firstName";
const KEY_LAST_NAME: &str = "lastName";
const KEY_EMAIL: &str = "email";
const KEY_LOGGED_IN: &str = "isLoggedIn";

/// Persistence for the registered user.
pub trait UserPreferences: Send + Sync {
    /// Stores the profile and marks the user as logged in, in one write.
    fn save_user_data(&self, first_name: &str, last_name: &str, email: &str);

    /// The stored profile, or `None` unless all three fields are present.
    fn get_user_data(&self) -> Option<UserProfile>;

    fn is_logged_in(&self) -> bool;

    /// Erases every stored key.
    fn clear_user_data(&self);
}

/// [`UserPreferences`] over a [`PreferenceStore`] namespace.
#[derive(Debug)]
pub struct UserPreferencesRepository {
    store: PreferenceStore,
}

impl UserPreferencesRepository {
    pub fn new(store: PreferenceStore) -> Self {
        Self { store }
    }
}

impl UserPreferences for UserPreferencesRepository {
    #[instrument(skip_all)]
    fn save_user_data(&self, first_name: &str, last_name: &str, email: &str) {
        self.store.edit(|e| {
            e.put_string(KEY_FIRST_NAME, first_name)
                .put_string(KEY_LAST_NAME, last_name)
                .put_string(KEY_EMAIL, email)
                .put_bool(KEY_LOGGED_IN, true);
        });
        debug!("User data saved");
    }

    fn get_user_data(&self) -> Option<UserProfile> {
        Some(UserProfile {
            first_name: self.store.get_string(KEY_FIRST_NAME)?,
            last_name: self.store.get_string(KEY_LAST_NAME)?,
            email: self.store.get_string(KEY_EMAIL)?,
        })
    }

    fn is_logged_in(&self) -> bool {
        self.store.get_bool(KEY_LOGGED_IN, false)
    }

    #[instrument(skip_all)]
    fn clear_user_data(&self) {
        self.store.edit(|e| {
            e.clear();
        });
        debug!("User data cleared");
    }
}
