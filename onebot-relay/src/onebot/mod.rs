//! OneBot webhook relay.
//!
//! Forwards every intercepted message record to a user-configured HTTP
//! endpoint, one detached POST per record.
//!
//! ```text
//! MsgRecord → OneBotHttpApi::on_receive → tokio::spawn → send_message → webhook
//! ```

pub mod listener;
pub mod sender;
pub mod types;

pub use listener::{OneBotHttpApi, CONFIG_KEY};
pub use sender::send_message;
pub use types::{PostMessageReq, SendError, SendOutcome};
