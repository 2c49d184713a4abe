//! JSON file backed settings store.
//!
//! The whole map is loaded on open and the whole file is rewritten on every
//! put. A missing file is treated as an empty map.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, info};

use super::{ConfigError, ConfigStore};

/// Settings persisted as a flat JSON object of strings.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading any existing values.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        let values = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        info!(
            path = %path.display(),
            keys = values.len(),
            "settings_file_loaded"
        );

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let body = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, body)?;

        debug!(path = %self.path.display(), keys = values.len(), "settings_file_written");
        Ok(())
    }
}

impl ConfigStore for FileStore {
    fn get_string(&self, key: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());

        // Only publish the new value once it is on disk.
        let mut updated = values.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated)?;

        *values = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.get_string("anything"), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let store = FileStore::open(&path).unwrap();
        store
            .put_string("MessageListenerHttpd", "http://127.0.0.1:5700/")
            .unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get_string("MessageListenerHttpd"),
            Some("http://127.0.0.1:5700/".to_string())
        );
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = FileStore::open(&path).unwrap();
        store
            .put_string("MessageListenerHttpd", "http://127.0.0.1:5700/")
            .unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let err = store
            .put_string("MessageListenerHttpd", "http://127.0.0.1:6800/")
            .unwrap_err();

        assert!(matches!(err, ConfigError::Io(_)));
        assert_eq!(
            store.get_string("MessageListenerHttpd"),
            Some("http://127.0.0.1:5700/".to_string())
        );
    }

    #[test]
    fn test_failed_write_leaves_missing_key_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = FileStore::open(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.put_string("MessageListenerHttpd", "http://evil/").is_err());
        assert_eq!(store.get_string("MessageListenerHttpd"), None);
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
