//! HTTP error mapping

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use netpol_kernel::{ClientError, ConversionDirection};
use serde_json::json;
use thiserror::Error;

/// Content type stamped on every API response, errors included.
pub const JSON_UTF8: &str = "application/json; charset=UTF-8";

/// Errors surfaced by the HTTP adapter
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("request body is not a valid document: {0}")]
    Unprocessable(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BodyRead(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Client(err) => match err {
                ClientError::Validation(_) => StatusCode::BAD_REQUEST,
                ClientError::Conversion(c) if c.direction == ConversionDirection::ToBackend => {
                    StatusCode::BAD_REQUEST
                }
                ClientError::Conversion(_) => StatusCode::INTERNAL_SERVER_ERROR,
                ClientError::NotFound(_) => StatusCode::NOT_FOUND,
                ClientError::AlreadyExists(_) => StatusCode::CONFLICT,
                _ => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            ApiError::BodyRead(_) => "INVALID_REQUEST",
            ApiError::Unprocessable(_) => "UNPROCESSABLE_ENTITY",
            ApiError::Client(ClientError::Validation(_)) => "VALIDATION_FAILED",
            ApiError::Client(ClientError::Conversion(_)) => "CONVERSION_FAILED",
            ApiError::Client(ClientError::NotFound(_)) => "RESOURCE_NOT_FOUND",
            ApiError::Client(ClientError::AlreadyExists(_)) => "RESOURCE_ALREADY_EXISTS",
            ApiError::Client(_) => "DATASTORE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side failures are logged, not echoed to the caller.
        let mut response = if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
            status.into_response()
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
            let body = Json(json!({
                "error": {
                    "code": self.code(),
                    "message": self.to_string(),
                }
            }));
            (status, body).into_response()
        };

        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use netpol_kernel::{ConversionError, DatastoreError, Key, ResourceKind, ValidationError};

    fn key() -> Key {
        Key::new(ResourceKind::Tier, ["t1"])
    }

    #[test]
    fn client_errors_map_to_statuses() {
        let cases = [
            (ClientError::Validation(ValidationError::new("name", "bad")), 400),
            (
                ClientError::Conversion(ConversionError::missing_field(ResourceKind::Tier, "name")),
                400,
            ),
            (
                ClientError::Conversion(ConversionError::from_backend(ResourceKind::Tier, "junk")),
                500,
            ),
            (ClientError::NotFound(key()), 404),
            (ClientError::AlreadyExists(key()), 409),
            (ClientError::Backend(DatastoreError::Unavailable("down".into())), 502),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status().as_u16(), status);
        }
    }

    #[test]
    fn server_errors_have_empty_bodies_and_json_content_type() {
        let err = ClientError::Backend(DatastoreError::Other("boom".into()));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()[header::CONTENT_TYPE], JSON_UTF8);
    }

    #[test]
    fn request_errors_map_to_statuses() {
        assert_eq!(
            ApiError::PayloadTooLarge { limit: 1 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(ApiError::BodyRead("eof".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Unprocessable("eof".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
