use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::network::DEFAULT_MENU_URL;

pub const ENV_MENU_URL: &str = "LITTLE_LEMON_MENU_URL";
pub const ENV_DATABASE: &str = "LITTLE_LEMON_DATABASE";
pub const ENV_PREFERENCES_DIR: &str = "LITTLE_LEMON_PREFERENCES_DIR";
pub const ENV_CHANNEL_BUFFER: &str = "LITTLE_LEMON_CHANNEL_BUFFER";

const DEFAULT_DATABASE: &str = "menu_database.db";
const DEFAULT_PREFERENCES_DIR: &str = ".";
const DEFAULT_CHANNEL_BUFFER: usize = 32;

/// Runtime settings for [`LemonSystem`](super::LemonSystem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub menu_url: String,
    pub database_path: PathBuf,
    pub preferences_dir: PathBuf,
    pub channel_buffer: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            menu_url: DEFAULT_MENU_URL.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE),
            preferences_dir: PathBuf::from(DEFAULT_PREFERENCES_DIR),
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
        }
    }
}

impl AppConfig {
    /// Reads settings from the environment, loading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let channel_buffer = match lookup(ENV_CHANNEL_BUFFER) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    warn!(value = %raw, key = ENV_CHANNEL_BUFFER, "Invalid channel buffer size, using default");
                    defaults.channel_buffer
                }
            },
            None => defaults.channel_buffer,
        };

        Self {
            menu_url: lookup(ENV_MENU_URL).unwrap_or(defaults.menu_url),
            database_path: lookup(ENV_DATABASE).map_or(defaults.database_path, PathBuf::from),
            preferences_dir: lookup(ENV_PREFERENCES_DIR).map_or(defaults.preferences_dir, PathBuf::from),
            channel_buffer,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_MENU_URL, "http://localhost:8080/menu.json"),
            (ENV_DATABASE, "/tmp/menu.db"),
            (ENV_PREFERENCES_DIR, "/tmp/prefs"),
            (ENV_CHANNEL_BUFFER, "8"),
        ]));

        assert_eq!(config.menu_url, "http://localhost:8080/menu.json");
        assert_eq!(config.database_path, PathBuf::from("/tmp/menu.db"));
        assert_eq!(config.preferences_dir, PathBuf::from("/tmp/prefs"));
        assert_eq!(config.channel_buffer, 8);
    }

    #[test]
    fn test_bad_buffer_falls_back() {
        for raw in ["zero", "0", "-3"] {
            let config = AppConfig::from_lookup(lookup(&[(ENV_CHANNEL_BUFFER, raw)]));
            assert_eq!(config.channel_buffer, DEFAULT_CHANNEL_BUFFER);
        }
    }
}
