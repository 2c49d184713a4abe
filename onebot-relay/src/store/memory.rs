//! In-memory settings store.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{ConfigError, ConfigStore};

/// Settings kept in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_uses_default() {
        let store = MemoryStore::new();
        assert_eq!(store.get_string("absent"), None);
        assert_eq!(store.get_string_or_default("absent", ""), "");
    }

    #[test]
    fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.put_string("key", "first").unwrap();
        store.put_string("key", "second").unwrap();
        assert_eq!(store.get_string("key"), Some("second".to_string()));
    }
}
