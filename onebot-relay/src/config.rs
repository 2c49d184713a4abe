//! Configuration module for environment variable parsing.
//!
//! Only the host process reads these. The destination URL itself lives in a
//! [`ConfigStore`](crate::store::ConfigStore) so it can be changed at runtime.

use std::env;
use std::path::PathBuf;

use tracing::warn;

/// Process configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the ingress server to listen on
    pub port: u16,

    /// Path of the JSON settings file; settings stay in memory when unset
    pub config_path: Option<PathBuf>,

    /// Destination URL written into the store at startup when none is saved
    pub onebot_url: Option<String>,

    /// Shared token expected in the `x-relay-auth` header of ingress requests
    pub auth_token: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: parse_port("PORT", 8080),

            config_path: non_empty("RELAY_CONFIG_PATH").map(PathBuf::from),

            onebot_url: non_empty("ONEBOT_URL"),

            auth_token: non_empty("RELAY_AUTH_TOKEN"),
        }
    }
}

fn parse_port(name: &str, default: u16) -> u16 {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(port) => port,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid port, using default");
            default
        }
    }
}

/// Read a variable, treating blank values as unset.
fn non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
