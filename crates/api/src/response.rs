//! Shared response envelope types for API handlers.
//!
//! List and compound responses use a `{ "data": ... }` envelope. Single
//! entity reads and the access-status trigger return the bare object.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
