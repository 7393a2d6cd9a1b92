//! The single choke point for notification mutations.

use std::sync::Arc;

use rokto_core::types::DbId;
use rokto_db::models::notification::Notification;
use rokto_db::repositories::NotificationRepo;
use rokto_db::DbPool;
use rokto_events::{FeedUpdate, NotificationBus};

/// Creates notification records and flips read flags, publishing every
/// mutation on the bus so per-user live feeds stay current.
///
/// Semantics are append-only and merge-free: two calls with identical
/// arguments mint two distinct records. No record ever supersedes another.
#[derive(Clone)]
pub struct NotificationService {
    pool: DbPool,
    bus: Arc<NotificationBus>,
}

impl NotificationService {
    /// Create a new service over the shared pool and bus.
    pub fn new(pool: DbPool, bus: Arc<NotificationBus>) -> Self {
        Self { pool, bus }
    }

    /// Append one notification record for `user_id`.
    ///
    /// The record always starts unread with a server-observed timestamp;
    /// title and body are stored as given, unvalidated. The write is
    /// acknowledged by the database before the update is published.
    pub async fn create(
        &self,
        user_id: DbId,
        title: &str,
        body: &str,
        kind: &str,
        link: Option<&str>,
    ) -> Result<Notification, sqlx::Error> {
        let notification =
            NotificationRepo::create(&self.pool, user_id, title, body, kind, link).await?;

        self.bus.publish(FeedUpdate::Created(notification.clone()));
        Ok(notification)
    }

    /// Mark one of `user_id`'s notifications as read.
    ///
    /// Idempotent: re-marking an already-read record reports success and
    /// changes nothing. Returns `false` only when the (id, user) pair does
    /// not exist.
    pub async fn mark_read(
        &self,
        user_id: DbId,
        notification_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let found = NotificationRepo::mark_read(&self.pool, notification_id, user_id).await?;
        if found {
            self.bus.publish(FeedUpdate::Read {
                user_id,
                notification_id,
            });
        }
        Ok(found)
    }

    /// Mark all of `user_id`'s unread notifications as read.
    ///
    /// Returns the number of records flipped.
    pub async fn mark_all_read(&self, user_id: DbId) -> Result<u64, sqlx::Error> {
        let marked = NotificationRepo::mark_all_read(&self.pool, user_id).await?;
        if marked > 0 {
            self.bus.publish(FeedUpdate::ReadAll { user_id });
        }
        Ok(marked)
    }
}
