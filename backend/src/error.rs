use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Invalid request body")]
    InvalidBody(#[from] JsonRejection),
}

impl BookingError {
    pub fn status(&self) -> StatusCode {
        match self {
            BookingError::MissingFields
            | BookingError::InvalidEmail
            | BookingError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        if let BookingError::InvalidBody(rejection) = &self {
            tracing::warn!("Rejected booking body: {}", rejection.body_text());
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
