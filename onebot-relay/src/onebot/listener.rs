//! The relay feature module: receives records and dispatches webhook posts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use reqwest::Client;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::sender::send_message;
use crate::hook::{ConfigurableUi, FunctionHook, Interceptor, MessageReceiver, MsgRecord};
use crate::store::{ConfigError, ConfigStore};

/// Settings key holding the destination URL. Empty disables the relay.
pub const CONFIG_KEY: &str = "MessageListenerHttpd";

/// Forwards message records to a OneBot-style HTTP endpoint.
///
/// The destination is re-read from the store for every record, so clearing
/// it only affects records that arrive afterwards.
pub struct OneBotHttpApi {
    me: Weak<OneBotHttpApi>,
    client: Client,
    store: Arc<dyn ConfigStore>,
    interceptor: Weak<Interceptor>,
    runtime: Handle,
    registered: AtomicBool,
}

impl OneBotHttpApi {
    /// Create the relay. Send tasks are spawned on `runtime`, so records may
    /// arrive from threads outside it.
    pub fn new(
        client: Client,
        store: Arc<dyn ConfigStore>,
        interceptor: Arc<Interceptor>,
        runtime: Handle,
    ) -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            client,
            store,
            interceptor: Arc::downgrade(&interceptor),
            runtime,
            registered: AtomicBool::new(false),
        })
    }

    /// Configured destination, or an empty string when disabled.
    pub fn destination_url(&self) -> String {
        self.store.get_string_or_default(CONFIG_KEY, "")
    }

    /// Store `url` as the destination unless one is already saved.
    ///
    /// Returns whether the value was written.
    pub fn seed_destination(&self, url: &str) -> Result<bool, ConfigError> {
        if self.store.get_string(CONFIG_KEY).is_some() {
            debug!("onebot_relay_seed_skipped");
            return Ok(false);
        }

        self.apply_value(url)?;
        Ok(true)
    }

    /// Spawn a send for `data` if the relay is enabled.
    ///
    /// The returned handle is only for callers that want to observe
    /// completion; [`MessageReceiver::on_receive`] drops it.
    pub fn dispatch(&self, data: Option<&MsgRecord>) -> Option<JoinHandle<()>> {
        let data = data?;

        let url = self.destination_url();
        if url.is_empty() {
            debug!(msg_id = data.msg_id, "onebot_relay_disabled");
            return None;
        }

        let client = self.client.clone();
        let record = data.clone();

        Some(self.runtime.spawn(async move {
            if let Err(e) = send_message(&client, &url, &record).await {
                error!(
                    server = %url,
                    msg_id = record.msg_id,
                    error = %e,
                    "onebot_post_failed"
                );
            }
        }))
    }
}

impl MessageReceiver for OneBotHttpApi {
    fn on_receive(&self, data: Option<&MsgRecord>) -> bool {
        let _ = self.dispatch(data);
        false
    }
}

impl FunctionHook for OneBotHttpApi {
    fn name(&self) -> &str {
        "OneBotHttpApi"
    }

    fn description(&self) -> &str {
        "Listener adapter for the OneBot protocol"
    }

    fn init_once(&self) -> bool {
        let Some(interceptor) = self.interceptor.upgrade() else {
            return false;
        };

        if !interceptor.initialize() {
            return false;
        }

        if !self.registered.swap(true, Ordering::SeqCst) {
            if let Some(me) = self.me.upgrade() {
                interceptor.register(me);
            }
        }

        true
    }
}

impl ConfigurableUi for OneBotHttpApi {
    fn title(&self) -> &str {
        "Set listener server URL"
    }

    fn message(&self) -> &str {
        "Enter the URL of the server that should receive messages"
    }

    fn hint(&self) -> &str {
        "Leave empty to disable"
    }

    fn current_value(&self) -> String {
        self.destination_url()
    }

    fn apply_value(&self, value: &str) -> Result<(), ConfigError> {
        self.store.put_string(CONFIG_KEY, value)?;
        info!(enabled = !value.is_empty(), "onebot_relay_url_updated");
        Ok(())
    }
}
