//! Dispatch table that fans message records out to registered receivers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use super::{MessageReceiver, MsgRecord};

/// Ordered list of receivers offered every intercepted record.
#[derive(Default)]
pub struct Interceptor {
    initialized: AtomicBool,
    receivers: RwLock<Vec<Arc<dyn MessageReceiver>>>,
}

impl Interceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the interception layer up. Safe to call more than once.
    pub fn initialize(&self) -> bool {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            info!("message_interception_initialized");
        }
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Append a receiver. Receivers are offered records in registration order.
    pub fn register(&self, receiver: Arc<dyn MessageReceiver>) {
        let mut receivers = self.receivers.write().unwrap_or_else(|e| e.into_inner());
        receivers.push(receiver);
        info!(receivers = receivers.len(), "message_receiver_registered");
    }

    pub fn receiver_count(&self) -> usize {
        self.receivers.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Offer `data` to each receiver until one consumes it.
    ///
    /// Returns `true` if some receiver consumed the record.
    pub fn dispatch(&self, data: Option<&MsgRecord>) -> bool {
        // Snapshot so receivers may register others without deadlocking.
        let receivers: Vec<_> = self
            .receivers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        for (index, receiver) in receivers.iter().enumerate() {
            if receiver.on_receive(data) {
                debug!(receiver_index = index, "message_record_consumed");
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct Counting {
        seen: AtomicUsize,
        consume: bool,
    }

    impl Counting {
        fn new(consume: bool) -> Arc<Self> {
            Arc::new(Self {
                seen: AtomicUsize::new(0),
                consume,
            })
        }
    }

    impl MessageReceiver for Counting {
        fn on_receive(&self, _data: Option<&MsgRecord>) -> bool {
            self.seen.fetch_add(1, Ordering::SeqCst);
            self.consume
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let interceptor = Interceptor::new();
        assert!(!interceptor.is_initialized());
        assert!(interceptor.initialize());
        assert!(interceptor.initialize());
        assert!(interceptor.is_initialized());
    }

    #[test]
    fn test_dispatch_reaches_all_when_unconsumed() {
        let interceptor = Interceptor::new();
        let first = Counting::new(false);
        let second = Counting::new(false);
        interceptor.register(first.clone());
        interceptor.register(second.clone());

        let consumed = interceptor.dispatch(Some(&MsgRecord::default()));

        assert!(!consumed);
        assert_eq!(first.seen.load(Ordering::SeqCst), 1);
        assert_eq!(second.seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_stops_at_consumer() {
        let interceptor = Interceptor::new();
        let consumer = Counting::new(true);
        let after = Counting::new(false);
        interceptor.register(consumer.clone());
        interceptor.register(after.clone());

        assert!(interceptor.dispatch(None));
        assert_eq!(consumer.seen.load(Ordering::SeqCst), 1);
        assert_eq!(after.seen.load(Ordering::SeqCst), 0);
    }
}
