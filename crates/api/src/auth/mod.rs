//! Authentication primitives.
//!
//! The identity provider (email/password, phone OTP, OAuth) lives outside
//! this service; it mints HS256 access tokens that [`jwt`] validates.

pub mod jwt;
