//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT session tokens and refresh-token helpers.
//! - [`access_token`] -- signed, time-boxed content access tokens.

pub mod access_token;
pub mod jwt;
pub mod password;
