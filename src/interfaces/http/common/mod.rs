//! Shared HTTP building blocks

pub mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::BookingRejection;

/// Standard API response envelope
///
/// Every REST endpoint wraps its payload in this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "reason"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Payload; `null` on failure unless the endpoint reports a boolean outcome
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl ApiResponse<bool> {
    /// Failure that still carries `data: false` for boolean endpoints
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(false),
            error: Some(message.into()),
        }
    }
}

/// Error half of a handler result
pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

/// HTTP status for each booking rejection
pub fn rejection_status(rejection: &BookingRejection) -> StatusCode {
    match rejection {
        BookingRejection::RoomNotFound(_)
        | BookingRejection::ClientNotFound(_)
        | BookingRejection::ReservationNotFound(_) => StatusCode::NOT_FOUND,
        BookingRejection::RoomDisabled(_) => StatusCode::GONE,
        BookingRejection::Overlap { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        BookingRejection::InvalidStay(_)
        | BookingRejection::ClientCreationFailed(_)
        | BookingRejection::PaymentCreationFailed(_) => StatusCode::BAD_REQUEST,
        BookingRejection::DocumentFailed(_) | BookingRejection::StoreFailure(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub fn rejection_error<T>(rejection: BookingRejection) -> ApiError<T> {
    (
        rejection_status(&rejection),
        Json(ApiResponse::error(rejection.to_string())),
    )
}

/// Same mapping, keeping `data: false` in the body
pub fn rejection_flag(rejection: BookingRejection) -> ApiError<bool> {
    (
        rejection_status(&rejection),
        Json(ApiResponse::rejected(rejection.to_string())),
    )
}

pub fn internal_error<T>(error: impl std::fmt::Display) -> ApiError<T> {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(error.to_string())),
    )
}

pub fn not_found<T>(message: impl Into<String>) -> ApiError<T> {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error(message)))
}
