use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use tracing::{debug, warn};

use super::PreferencesError;

type Entries = BTreeMap<String, Value>;

/// A named key-value namespace persisted as one JSON file.
///
/// Reads are served from memory. Each [`PreferenceStore::edit`] commits all of
/// its changes in a single file write; write failures are logged, not returned.
#[derive(Debug)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    entries: Mutex<Entries>,
}

impl PreferenceStore {
    /// Opens `<dir>/<namespace>.json`, creating `dir` if needed.
    pub fn open(dir: impl AsRef<Path>, namespace: &str) -> Result<Self, PreferencesError> {
        fs::create_dir_all(dir.as_ref())?;
        let path = dir.as_ref().join(format!("{namespace}.json"));

        let entries = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Entries::new()
        };
        debug!(path = %path.display(), key_count = entries.len(), "Preferences opened");

        Ok(Self {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(Entries::new()),
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.entries().get(key).and_then(Value::as_str).map(str::to_owned)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.entries().get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Applies every change made through the editor, then persists once.
    pub fn edit<F>(&self, apply: F)
    where
        F: FnOnce(&mut PreferenceEditor),
    {
        let mut entries = self.entries();
        let mut editor = PreferenceEditor {
            entries: entries.clone(),
        };
        apply(&mut editor);
        *entries = editor.entries;
        self.persist(&entries);
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &Entries) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = write_atomically(path, entries) {
            warn!(path = %path.display(), error = %e, "Failed to persist preferences");
        }
    }
}

fn write_atomically(path: &Path, entries: &Entries) -> Result<(), PreferencesError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Pending changes to a [`PreferenceStore`].
pub struct PreferenceEditor {
    entries: Entries,
}

impl PreferenceEditor {
    pub fn put_string(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.to_owned(), Value::String(value.into()));
        self
    }

    pub fn put_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.entries.insert(key.to_owned(), Value::Bool(value));
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = PreferenceStore::open(dir.path(), "Prefs").unwrap();
        store.edit(|e| {
            e.put_string("name", "Tilly").put_bool("flag", true);
        });

        let reopened = PreferenceStore::open(dir.path(), "Prefs").unwrap();
        assert_eq!(reopened.get_string("name").as_deref(), Some("Tilly"));
        assert!(reopened.get_bool("flag", false));
        assert!(dir.path().join("Prefs.json").exists());
    }

    #[test]
    fn test_missing_and_mistyped_keys_use_defaults() {
        let store = PreferenceStore::in_memory();
        store.edit(|e| {
            e.put_string("flag", "yes");
        });

        assert_eq!(store.get_string("absent"), None);
        assert!(!store.get_bool("flag", false));
        assert!(store.get_bool("absent", true));
    }

    #[test]
    fn test_clear_erases_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path(), "Prefs").unwrap();
        store.edit(|e| {
            e.put_string("name", "Tilly");
        });
        store.edit(|e| {
            e.clear();
        });

        let reopened = PreferenceStore::open(dir.path(), "Prefs").unwrap();
        assert_eq!(reopened.get_string("name"), None);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Prefs.json"), "{not json").unwrap();

        let err = PreferenceStore::open(dir.path(), "Prefs").unwrap_err();
        assert!(matches!(err, PreferencesError::Json(_)));
    }
}
