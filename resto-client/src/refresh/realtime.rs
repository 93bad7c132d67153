//! Realtime push channel
//!
//! The backend pushes a `refresh-token` event when the server side wants the
//! client to renew immediately (e.g. after a role change). The refresher
//! subscribes for its own lifetime only.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// 默认广播容量
const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RealtimeEvent {
    Connected { id: String },
    Disconnected,
    /// Server asks for an immediate forced refresh
    RefreshToken,
}

pub trait RealtimeChannel: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent>;
    fn is_connected(&self) -> bool;
    fn disconnect(&self);
}

/// In-process channel backed by `tokio::sync::broadcast`
#[derive(Debug, Clone)]
pub struct BroadcastRealtime {
    tx: broadcast::Sender<RealtimeEvent>,
    connected: Arc<AtomicBool>,
}

impl BroadcastRealtime {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            connected: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark the channel connected and announce it
    pub fn connect(&self, id: impl Into<String>) {
        self.connected.store(true, Ordering::SeqCst);
        self.publish(RealtimeEvent::Connected { id: id.into() });
    }

    /// Returns the number of subscribers that received the event
    pub fn publish(&self, event: RealtimeEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastRealtime {
    fn default() -> Self {
        Self::new()
    }
}

impl RealtimeChannel for BroadcastRealtime {
    fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.tx.subscribe()
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn disconnect(&self) {
        if self.connected.swap(false, Ordering::SeqCst) {
            self.publish(RealtimeEvent::Disconnected);
        }
    }
}
