//! Response envelope shared by all JSON handlers.

use serde::Serialize;

/// `{ "data": T }` envelope. Errors use `{ "error", "code" }` instead (see
/// [`crate::error::AppError`]).
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
