//! Shared response body types for API handlers.
//!
//! Zone endpoints return records and arrays unwrapped; plain confirmations
//! use [`MessageResponse`].

use serde::Serialize;

/// `{ "message": "..." }` confirmation body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
