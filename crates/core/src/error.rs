//! Domain-level error type shared across crates.

use crate::types::DbId;

/// Error type for domain operations.
///
/// The API layer maps each variant onto an HTTP status in its own
/// `AppError` wrapper; nothing here knows about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id came back empty.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain validation rule.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation conflicts with current state (e.g. a one-way
    /// status transition attempted in reverse).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but not allowed to do this.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Something went wrong that the caller cannot fix.
    #[error("Internal error: {0}")]
    Internal(String),
}
