//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod blood_request_repo;
pub mod notification_repo;
pub mod post_repo;
pub mod profile_repo;

pub use blood_request_repo::BloodRequestRepo;
pub use notification_repo::NotificationRepo;
pub use post_repo::PostRepo;
pub use profile_repo::ProfileRepo;
