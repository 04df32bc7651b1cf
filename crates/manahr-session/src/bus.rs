//! Session state change notifications
//!
//! Published on a tokio broadcast channel so views can refresh when the
//! signed-in identity changes.

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

/// Channel capacity for broadcast events
const CHANNEL_CAPACITY: usize = 64;

/// A change of the signed-in identity
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A new identity replaced whatever was there
    LoggedIn { user_id: String, at: DateTime<Utc> },
    /// The identity's role and permissions were reloaded
    Refreshed { user_id: String },
    /// Explicit logout
    LoggedOut,
    /// The backend rejected the session (HTTP 401)
    Expired,
}

/// Event bus for session events
///
/// Clones share the same underlying channel.
#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: SessionEvent) {
        // no subscribers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
