//! Well-known role name constants.
//!
//! These must match the values stored in the `profiles.role` column and
//! the `role` claim carried in access tokens.

pub const ROLE_DONOR: &str = "donor";
pub const ROLE_RECEIVER: &str = "receiver";
pub const ROLE_ADMIN: &str = "admin";
