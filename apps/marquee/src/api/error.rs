//! # API Errors
//!
//! Maps engine errors to HTTP responses.
//!
//! | Error | Status |
//! |---|---|
//! | `CountryNotFound` | 404 |
//! | `StoreUnavailable` | 500 |
//! | `IoError` | 500 |
//!
//! The body is always `{"message": <error text>}`. Store messages are passed
//! through verbatim.

use super::types::MessageResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use marquee_core::MarqueeError;

/// An engine error on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub MarqueeError);

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.0 {
            MarqueeError::CountryNotFound(_) => StatusCode::NOT_FOUND,
            MarqueeError::StoreUnavailable(_) | MarqueeError::IoError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<MarqueeError> for ApiError {
    fn from(err: MarqueeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Query failed: {}", self.0);
        } else {
            tracing::debug!("{}", self.0);
        }
        (status, Json(MessageResponse::new(self.0.to_string()))).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_404() {
        let err = ApiError::from(MarqueeError::CountryNotFound("Atlantis".to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_is_500() {
        let err = ApiError::from(MarqueeError::StoreUnavailable("down".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
