//! Key-value settings storage.
//!
//! Feature modules read and write their settings as plain strings keyed by
//! the module's identifier. Two backends are provided:
//! - [`MemoryStore`]: process-local, lost on exit
//! - [`FileStore`]: a JSON object on disk, rewritten on every put

pub mod file;
pub mod memory;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised while persisting settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings file is not a JSON string map: {0}")]
    Json(#[from] serde_json::Error),
}

/// String settings store shared between feature modules.
pub trait ConfigStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn put_string(&self, key: &str, value: &str) -> Result<(), ConfigError>;

    fn get_string_or_default(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_string())
    }
}
