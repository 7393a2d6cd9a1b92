//! Rokto notification bus and live feed infrastructure.
//!
//! This crate provides the real-time half of the notification system:
//!
//! - [`NotificationBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, carrying every notification insert and
//!   read-flag flip.
//! - [`FeedUpdate`] — the change envelope published on the bus.
//! - [`NotificationFeed`] / [`FeedSubscription`] — a per-user live view
//!   that recomputes its derived state (ordered list, unread badge count)
//!   on every event, with explicit unsubscribe.

pub mod bus;
pub mod feed;

pub use bus::{FeedUpdate, NotificationBus};
pub use feed::{FeedSubscription, NotificationFeed};
