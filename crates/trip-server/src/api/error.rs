//! HTTP mapping for [`TripError`].

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use trip_core::TripError;

/// Handler error rendered as `{ "message": ... }`.
#[derive(Debug)]
pub struct ApiError(pub TripError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(TripError::validation(message))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TripError::Validation(_) => StatusCode::BAD_REQUEST,
            TripError::LocationNotFound(_) => StatusCode::NOT_FOUND,
            TripError::RouteNotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TripError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            TripError::UpstreamService(_) | TripError::EnrichmentParse(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            TripError::Validation(message) => message.clone(),
            TripError::LocationNotFound(_) => "Location not found".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<TripError> for ApiError {
    fn from(err: TripError) -> Self {
        Self(err)
    }
}

/// Malformed or mistyped JSON bodies are validation failures.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("Request failed with {}: {}", status, self.0);
        }
        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_error_kinds_to_statuses() {
        let cases = [
            (TripError::validation("x"), StatusCode::BAD_REQUEST),
            (TripError::LocationNotFound("x".into()), StatusCode::NOT_FOUND),
            (TripError::RouteNotFound("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (TripError::Configuration("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (TripError::upstream("x"), StatusCode::BAD_GATEWAY),
            (TripError::EnrichmentParse("x".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }

    #[test]
    fn validation_message_is_passed_through() {
        let err = ApiError::bad_request("City name is required");
        assert_eq!(err.message(), "City name is required");
    }
}
