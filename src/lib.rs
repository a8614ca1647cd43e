//! # Little Lemon ordering core
//!
//! Menu synchronization, cart state and onboarding for the Little Lemon
//! restaurant app.
//!
//! - **Validator** - pure name/email checks → [`validator`]
//! - **Remote menu source** - one HTTP GET of a JSON document → [`network::HttpMenuService`]
//! - **Local menu cache** - SQLite table with a live snapshot channel → [`cache::SqliteMenuCache`]
//! - **Menu repository** - fetch, replace cache, reactive reads → [`repository::MenuRepository`]
//! - **User preferences** - profile fields and logged-in flag → [`preferences::UserPreferencesRepository`]
//! - **Cart** - merge-on-add lines run inside a state actor → [`clients::CartClient`]
//! - **View models** - observable UI state → [`viewmodel::MainViewModel`], [`viewmodel::OnboardingViewModel`]
//! - **System coordinator** - explicit wiring, startup and shutdown → [`app_system::LemonSystem`]

pub mod actor_framework;
pub mod app_system;
pub mod cache;
pub mod cart_actor;
pub mod clients;
pub mod domain;
pub mod network;
pub mod preferences;
pub mod repository;
pub mod validator;
pub mod viewmodel;

#[cfg(test)]
mod mock_framework;
