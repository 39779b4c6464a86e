//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod access;
pub mod batch;
pub mod lecture;
pub mod notification;
pub mod session;
pub mod timetable;
pub mod user;
