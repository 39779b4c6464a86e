//! EduPass domain core.
//!
//! Pure domain rules shared by the database, event and API crates. Nothing
//! in here performs I/O, so every rule can be unit-tested in isolation.

pub mod access;
pub mod catalog;
pub mod change;
pub mod chat;
pub mod error;
pub mod notifications;
pub mod pagination;
pub mod role_gate;
pub mod roles;
pub mod types;
pub mod verification;
