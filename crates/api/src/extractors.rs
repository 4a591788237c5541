//! Request extraction helpers.
//!
//! Axum rejects bad bodies and query strings with plain-text responses and
//! mixed status codes. Handlers take the extractor as a `Result` and pass it
//! through these helpers so every rejection becomes a JSON 400.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;

use crate::error::AppError;

/// Unwrap a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Unwrap query parameters, mapping parse errors to [`AppError::BadRequest`].
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
