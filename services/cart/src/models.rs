//! API models for request and response payloads

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

pub mod cart_item;
pub mod product;
pub mod user;

pub use cart_item::{
    CartItem, CartItemDetails, CartItemQuery, CartItemRequest, CartItemView, RemoveOutcome,
    UpdateCartItemRequest,
};
pub use product::{NewProduct, Product, UpdateProduct};
pub use user::{NewUser, UpdateUser, User};

/// Envelope wrapping every JSON response of the service
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, Some(data))
    }

    /// Response for a freshly created resource
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, Some(data))
    }

    fn with_status(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: status.as_u16(),
            success: status.is_success(),
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<()> {
    /// Successful response without a payload
    pub fn message(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, message, None)
    }

    /// Failure response; `data` is always null
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::with_status(status, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
