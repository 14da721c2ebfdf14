//! API handlers for the Pinjam REST endpoints
//!
//! Every response uses the uniform envelope: `{success, data, message?}`
//! on success, `{success: false, error, message}` on failure (see
//! [`crate::error::ErrorResponse`]). The OpenAPI annotations document the
//! `data` payload types.

pub mod health;
pub mod history;
pub mod items;
pub mod loans;
pub mod openapi;

use serde::Serialize;
use utoipa::ToSchema;

/// Uniform success envelope: `{success, data, message?}`
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

/// Success envelope for operations with no payload (deletes)
#[derive(Serialize, ToSchema)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Paginated list payload
#[derive(Serialize)]
pub struct Paginated<T: Serialize> {
    /// List slice for the requested page
    pub items: Vec<T>,
    /// Total number of matches before pagination
    pub total: i64,
    /// Current page number (1-based)
    pub page: i64,
    /// Items per page
    pub limit: i64,
}
