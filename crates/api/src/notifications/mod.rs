//! Notification core: the minting choke point and the donor matcher.
//!
//! [`NotificationService`] is the only path through which notification
//! records are created or have their read flag flipped; every mutation it
//! performs is also published on the [`NotificationBus`](rokto_events::NotificationBus)
//! so live feeds observe it. [`DonorMatcher`] fans a new blood request out
//! to every matching donor through that same service.

pub mod matcher;
pub mod service;

pub use matcher::DonorMatcher;
pub use service::NotificationService;
