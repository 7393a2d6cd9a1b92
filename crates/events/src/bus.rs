//! In-process notification bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`NotificationBus`] is the publish/subscribe hub through which every
//! notification mutation flows. It is designed to be shared via
//! `Arc<NotificationBus>` across the application.

use serde::Serialize;
use tokio::sync::broadcast;

use rokto_core::types::DbId;
use rokto_db::models::notification::Notification;

/// A change to the notification set, published for live subscribers.
///
/// The store is append-mostly: records are created, and their read flag
/// flips once. Those are the only deltas a feed can observe.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedUpdate {
    /// A notification record was appended.
    Created(Notification),

    /// A single notification was marked read by its owner.
    Read { user_id: DbId, notification_id: DbId },

    /// All of a user's notifications were marked read.
    ReadAll { user_id: DbId },
}

impl FeedUpdate {
    /// The user whose feed this update belongs to.
    pub fn user_id(&self) -> DbId {
        match self {
            FeedUpdate::Created(n) => n.user_id,
            FeedUpdate::Read { user_id, .. } => *user_id,
            FeedUpdate::ReadAll { user_id } => *user_id,
        }
    }
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out bus for notification changes.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`FeedUpdate`].
pub struct NotificationBus {
    sender: broadcast::Sender<FeedUpdate>,
}

impl NotificationBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an update to all current subscribers.
    ///
    /// If there are no active subscribers the update is silently dropped;
    /// the database row is the durable record either way.
    pub fn publish(&self, update: FeedUpdate) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(update);
    }

    /// Subscribe to all updates published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<FeedUpdate> {
        self.sender.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(id: DbId, user_id: DbId) -> Notification {
        Notification {
            id,
            user_id,
            title: "T".into(),
            body: "B".into(),
            kind: "social".into(),
            is_read: false,
            read_at: None,
            link: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();

        bus.publish(FeedUpdate::Created(notification(1, 7)));

        let received = rx.recv().await.expect("should receive the update");
        assert_eq!(received.user_id(), 7);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_update() {
        let bus = NotificationBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(FeedUpdate::ReadAll { user_id: 3 });

        assert_eq!(rx1.recv().await.unwrap().user_id(), 3);
        assert_eq!(rx2.recv().await.unwrap().user_id(), 3);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = NotificationBus::default();
        // No subscribers — this must not panic.
        bus.publish(FeedUpdate::Read {
            user_id: 1,
            notification_id: 2,
        });
    }
}
