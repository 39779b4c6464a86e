//! Domain errors shared by the API handlers and extractors.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A batch, lecture, timetable entry, notification or user is missing.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: DbId },

    #[error("invalid input: {0}")]
    Validation(String),

    /// Missing, malformed or expired credentials.
    #[error("not authenticated: {0}")]
    Unauthorized(String),

    /// Authenticated, but the role or an unlock window does not allow it.
    #[error("not allowed: {0}")]
    Forbidden(String),
}
