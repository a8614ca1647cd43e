//! UI-facing state holders. Every observable is a `watch` channel: it holds the
//! current value, hands it to new subscribers, and notifies on change.

mod error;
mod main_view_model;
mod onboarding;
mod scope;

pub use error::CheckoutError;
pub use main_view_model::MainViewModel;
pub use onboarding::{OnboardingState, OnboardingViewModel};
pub use scope::WorkScope;
