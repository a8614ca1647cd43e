use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::domain::{FormField, RegistrationForm, UserProfile};
use crate::preferences::UserPreferences;
use crate::validator::{validate_email, validate_first_name, validate_last_name, ValidationError};

type Validator = for<'a> fn(&'a str) -> Result<&'a str, ValidationError>;

/// Observable state of the registration flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingState {
    pub form: RegistrationForm,
    pub is_form_valid: bool,
    pub onboarding_complete: bool,
    pub logged_in: bool,
}

/// Drives the onboarding form: live per-field validation, registration and
/// logout.
pub struct OnboardingViewModel {
    preferences: Arc<dyn UserPreferences>,
    state: watch::Sender<OnboardingState>,
}

impl OnboardingViewModel {
    /// Preloads any saved profile and the logged-in flag.
    pub fn new(preferences: Arc<dyn UserPreferences>) -> Self {
        let mut initial = OnboardingState {
            logged_in: preferences.is_logged_in(),
            ..OnboardingState::default()
        };
        if let Some(profile) = preferences.get_user_data() {
            initial.form = RegistrationForm {
                first_name: FormField::with_value(profile.first_name),
                last_name: FormField::with_value(profile.last_name),
                email: FormField::with_value(profile.email),
            };
        }

        let (state, _) = watch::channel(initial);
        Self { preferences, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<OnboardingState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> OnboardingState {
        self.state.borrow().clone()
    }

    pub fn update_first_name(&self, name: impl Into<String>) {
        self.update_field(|form| &mut form.first_name, name.into(), validate_first_name);
    }

    pub fn update_last_name(&self, name: impl Into<String>) {
        self.update_field(|form| &mut form.last_name, name.into(), validate_last_name);
    }

    pub fn update_email(&self, email: impl Into<String>) {
        self.update_field(|form| &mut form.email, email.into(), validate_email);
    }

    fn update_field(
        &self,
        select: fn(&mut RegistrationForm) -> &mut FormField,
        value: String,
        validate: Validator,
    ) {
        self.state.send_modify(|state| {
            select(&mut state.form).update(value, validate);
            state.is_form_valid = state.form.is_valid();
        });
    }

    /// Re-validates every field and, if all pass, persists the profile and
    /// completes onboarding.
    ///
    /// # Errors
    /// The first failing field's [`ValidationError`]; nothing is persisted.
    #[instrument(skip(self))]
    pub fn validate_and_register(&self) -> Result<UserProfile, ValidationError> {
        let form = self.state.borrow().form.clone();

        let failures = [
            validate_first_name(&form.first_name.value).err(),
            validate_last_name(&form.last_name.value).err(),
            validate_email(&form.email.value).err(),
        ];
        if let Some(err) = failures.into_iter().flatten().next() {
            warn!(error = %err, "Registration rejected");
            return Err(err);
        }

        let profile = UserProfile::new(form.first_name.value, form.last_name.value, form.email.value);
        self.preferences
            .save_user_data(&profile.first_name, &profile.last_name, &profile.email);

        self.state.send_modify(|state| {
            state.onboarding_complete = true;
            state.logged_in = true;
        });
        info!("Registration complete");
        Ok(profile)
    }

    /// Clears persisted data and returns to the initial state.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.preferences.clear_user_data();
        self.state.send_replace(OnboardingState::default());
        info!("User logged out");
    }
}
