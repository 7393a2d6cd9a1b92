//! Well-known notification kind constants.
//!
//! These must match the values stored in the `notifications.kind` column
//! and referenced by the donor matcher, the social handlers, and the
//! notification API.

/// Emergency blood request fan-out from the donor matcher.
pub const KIND_REQUEST: &str = "request";

/// Donor/request match follow-up (e.g. a donor responded).
pub const KIND_MATCH: &str = "match";

/// Social interaction (like, comment).
pub const KIND_SOCIAL: &str = "social";

/// Announcement sent by an administrator.
pub const KIND_ADMIN: &str = "admin";
