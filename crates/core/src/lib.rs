//! Domain layer for the rokto blood-donation platform.
//!
//! Pure types and helpers shared by every other crate: identifiers,
//! the domain error type, the blood-group vocabulary, request
//! severity/status enums, role and notification-kind constants, the
//! Bangladesh administrative geography tables, and the donation
//! eligibility rule. No I/O lives here.

pub mod blood;
pub mod eligibility;
pub mod error;
pub mod geo;
pub mod kinds;
pub mod requests;
pub mod roles;
pub mod types;

pub use blood::BloodGroup;
pub use error::CoreError;
pub use requests::{EmergencyLevel, RequestStatus};
