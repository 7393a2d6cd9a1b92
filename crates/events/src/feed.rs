//! Per-user live notification feed.
//!
//! A [`FeedSubscription`] observes the [`NotificationBus`] filtered to one
//! user and maintains the derived state a client renders: the ordered
//! notification list and the unread badge count. The contract it keeps:
//!
//! - every change to the user's own notifications eventually shows up in
//!   the view (within channel capacity);
//! - recomputation is idempotent — re-applying an update the view has
//!   already absorbed changes nothing;
//! - teardown is explicit and released exactly once via
//!   [`FeedSubscription::unsubscribe`]; after that no further state
//!   changes occur.

use tokio::sync::broadcast;

use rokto_core::types::DbId;
use rokto_db::models::notification::Notification;

use crate::bus::{FeedUpdate, NotificationBus};

/// Entry point for opening live feeds.
pub struct NotificationFeed;

impl NotificationFeed {
    /// Open a live feed for `user_id`, seeded with a snapshot of the
    /// user's current notifications (newest first, as the repository
    /// lists them).
    ///
    /// The subscription starts receiving updates published after this
    /// call; the snapshot covers everything before it.
    pub fn subscribe(
        bus: &NotificationBus,
        user_id: DbId,
        snapshot: Vec<Notification>,
    ) -> FeedSubscription {
        FeedSubscription {
            user_id,
            notifications: snapshot,
            receiver: Some(bus.subscribe()),
        }
    }
}

/// A live, per-user view over the notification set.
pub struct FeedSubscription {
    user_id: DbId,
    /// Newest first, mirroring the repository's list order.
    notifications: Vec<Notification>,
    /// `None` once unsubscribed.
    receiver: Option<broadcast::Receiver<FeedUpdate>>,
}

impl FeedSubscription {
    /// The user this feed belongs to.
    pub fn user_id(&self) -> DbId {
        self.user_id
    }

    /// Current ordered view, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Badge count: notifications currently unread in the view.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Whether the subscription is still attached to the bus.
    pub fn is_active(&self) -> bool {
        self.receiver.is_some()
    }

    /// Wait for the next update that changes this user's view and apply it.
    ///
    /// Updates for other users are skipped silently. Returns the applied
    /// update, or `None` when the subscription has been released (either
    /// via [`unsubscribe`](Self::unsubscribe) or because the bus was
    /// dropped) — after a `None` the view never changes again.
    pub async fn next_change(&mut self) -> Option<FeedUpdate> {
        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.recv().await {
                Ok(update) => {
                    if update.user_id() != self.user_id {
                        continue;
                    }
                    if Self::apply(&mut self.notifications, &update) {
                        return Some(update);
                    }
                    // Absorbed before (redelivery); keep waiting.
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        user_id = self.user_id,
                        skipped = n,
                        "Notification feed lagged, view may be stale until next snapshot"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    /// Detach from the bus, stopping all further view updates.
    ///
    /// Idempotent: the second and later calls are no-ops, so the
    /// underlying receiver is released exactly once.
    pub fn unsubscribe(&mut self) {
        self.receiver = None;
    }

    /// Fold one update into the view. Returns whether anything changed,
    /// which makes redelivered updates no-ops.
    fn apply(notifications: &mut Vec<Notification>, update: &FeedUpdate) -> bool {
        match update {
            FeedUpdate::Created(n) => {
                if notifications.iter().any(|existing| existing.id == n.id) {
                    return false;
                }
                notifications.insert(0, n.clone());
                true
            }
            FeedUpdate::Read {
                notification_id, ..
            } => {
                match notifications
                    .iter_mut()
                    .find(|n| n.id == *notification_id && !n.is_read)
                {
                    Some(n) => {
                        n.is_read = true;
                        true
                    }
                    None => false,
                }
            }
            FeedUpdate::ReadAll { .. } => {
                let mut changed = false;
                for n in notifications.iter_mut().filter(|n| !n.is_read) {
                    n.is_read = true;
                    changed = true;
                }
                changed
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn notification(id: DbId, user_id: DbId) -> Notification {
        Notification {
            id,
            user_id,
            title: format!("T{id}"),
            body: "B".into(),
            kind: "request".into(),
            is_read: false,
            read_at: None,
            link: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn created_updates_grow_the_view_and_badge() {
        let bus = NotificationBus::default();
        let mut feed = NotificationFeed::subscribe(&bus, 7, vec![]);

        bus.publish(FeedUpdate::Created(notification(1, 7)));
        bus.publish(FeedUpdate::Created(notification(2, 7)));

        feed.next_change().await.unwrap();
        feed.next_change().await.unwrap();

        assert_eq!(feed.notifications().len(), 2);
        assert_eq!(feed.unread_count(), 2);
        // Newest first.
        assert_eq!(feed.notifications()[0].id, 2);
    }

    #[tokio::test]
    async fn other_users_updates_are_filtered_out() {
        let bus = NotificationBus::default();
        let mut feed = NotificationFeed::subscribe(&bus, 7, vec![]);

        bus.publish(FeedUpdate::Created(notification(1, 99)));
        bus.publish(FeedUpdate::Created(notification(2, 7)));

        let applied = feed.next_change().await.unwrap();
        assert_eq!(applied.user_id(), 7);
        assert_eq!(feed.notifications().len(), 1);
        assert_eq!(feed.notifications()[0].id, 2);
    }

    #[tokio::test]
    async fn badge_reaches_exactly_zero_after_last_read() {
        let bus = NotificationBus::default();
        let snapshot = vec![notification(2, 7), notification(1, 7)];
        let mut feed = NotificationFeed::subscribe(&bus, 7, snapshot);
        assert_eq!(feed.unread_count(), 2);

        bus.publish(FeedUpdate::Read {
            user_id: 7,
            notification_id: 2,
        });
        feed.next_change().await.unwrap();
        assert_eq!(feed.unread_count(), 1);

        bus.publish(FeedUpdate::Read {
            user_id: 7,
            notification_id: 1,
        });
        feed.next_change().await.unwrap();
        assert_eq!(feed.unread_count(), 0);
    }

    #[tokio::test]
    async fn redelivered_updates_are_idempotent() {
        let bus = NotificationBus::default();
        let mut feed = NotificationFeed::subscribe(&bus, 7, vec![notification(1, 7)]);

        bus.publish(FeedUpdate::Read {
            user_id: 7,
            notification_id: 1,
        });
        feed.next_change().await.unwrap();
        assert_eq!(feed.unread_count(), 0);

        // The same flip again changes nothing; next_change keeps waiting,
        // so it must time out rather than report a change.
        bus.publish(FeedUpdate::Read {
            user_id: 7,
            notification_id: 1,
        });
        let waited =
            tokio::time::timeout(Duration::from_millis(50), feed.next_change()).await;
        assert!(waited.is_err(), "re-applied update must not change the view");
        assert_eq!(feed.unread_count(), 0);
    }

    #[tokio::test]
    async fn read_all_clears_the_badge() {
        let bus = NotificationBus::default();
        let snapshot = vec![notification(3, 7), notification(2, 7), notification(1, 7)];
        let mut feed = NotificationFeed::subscribe(&bus, 7, snapshot);

        bus.publish(FeedUpdate::ReadAll { user_id: 7 });
        feed.next_change().await.unwrap();

        assert_eq!(feed.unread_count(), 0);
        assert_eq!(feed.notifications().len(), 3);
    }

    #[tokio::test]
    async fn no_updates_after_unsubscribe() {
        let bus = NotificationBus::default();
        let mut feed = NotificationFeed::subscribe(&bus, 7, vec![]);

        feed.unsubscribe();
        assert!(!feed.is_active());

        // A write issued after unsubscribe never reaches the view.
        bus.publish(FeedUpdate::Created(notification(1, 7)));
        assert!(feed.next_change().await.is_none());
        assert!(feed.notifications().is_empty());

        // Releasing twice is a no-op, not an error.
        feed.unsubscribe();
    }

    #[tokio::test]
    async fn dropping_the_bus_ends_the_subscription() {
        let bus = NotificationBus::default();
        let mut feed = NotificationFeed::subscribe(&bus, 7, vec![]);
        drop(bus);

        assert!(feed.next_change().await.is_none());
        assert!(!feed.is_active());
    }
}
