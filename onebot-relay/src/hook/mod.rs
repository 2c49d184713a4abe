//! Capability traits for feature modules and the interception dispatch table.
//!
//! A feature module is a single value implementing whichever of these traits
//! it needs:
//! - [`FunctionHook`]: name, description and one-time initialisation
//! - [`MessageReceiver`]: called for every intercepted message record
//! - [`ConfigurableUi`]: exposes one editable string setting
//!
//! ## Flow
//!
//! ```text
//! Event source → Interceptor::dispatch → MessageReceiver::on_receive (in order)
//! ```

pub mod interception;
pub mod types;

use crate::store::ConfigError;

pub use interception::Interceptor;
pub use types::MsgRecord;

/// Lifecycle of a feature module.
pub trait FunctionHook: Send + Sync {
    /// Stable identifier shown to users.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Prepare the module. Returns `false` if it could not be enabled.
    fn init_once(&self) -> bool;
}

/// Receives message records from the interception layer.
pub trait MessageReceiver: Send + Sync {
    /// Handle one record. Returning `true` consumes it and stops propagation
    /// to later receivers.
    fn on_receive(&self, data: Option<&MsgRecord>) -> bool;
}

/// A single editable string setting with its dialog text.
pub trait ConfigurableUi: Send + Sync {
    fn title(&self) -> &str;

    fn message(&self) -> &str;

    /// Placeholder shown while the value is empty.
    fn hint(&self) -> &str;

    fn current_value(&self) -> String;

    fn apply_value(&self, value: &str) -> Result<(), ConfigError>;
}
