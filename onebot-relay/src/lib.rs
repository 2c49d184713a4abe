//! OneBot Relay - forwards intercepted chat messages to an HTTP webhook.
//!
//! This library provides:
//! - `hook`: capability traits for feature modules and the interception table
//! - `onebot`: the webhook relay feature module
//! - `store`: string settings storage
//! - `web`: an ingress server for feeding records in and editing settings
//!
//! ## Architecture
//!
//! ```text
//! Ingress → Interceptor → OneBotHttpApi → (detached task) → webhook POST
//! ```

pub mod config;
pub mod hook;
pub mod onebot;
pub mod store;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use hook::{ConfigurableUi, FunctionHook, Interceptor, MessageReceiver, MsgRecord};
pub use onebot::{send_message, OneBotHttpApi, PostMessageReq, SendError, SendOutcome, CONFIG_KEY};
pub use store::{ConfigError, ConfigStore, FileStore, MemoryStore};
pub use web::AppState;
