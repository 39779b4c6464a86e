//! Shared response envelope types for API handlers.
//!
//! Most responses use a `{ "data": ... }` envelope. The access and chat
//! endpoints answer with their own fixed shapes instead.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
