// Response types for the gateway routes

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

/// A backend response relayed to the browser: the original status code and,
/// for non-delete operations, the JSON body exactly as the backend sent it.
/// `body: None` means an empty relay (delete operations).
#[derive(Debug, Clone)]
pub struct Relayed {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self.body {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        }
    }
}

/// An auth-flow relay: like [`Relayed`], plus the backend's `Set-Cookie`
/// headers so the browser stores or clears the session cookie.
#[derive(Debug, Clone)]
pub struct AuthRelay {
    pub status: u16,
    pub body: serde_json::Value,
    pub cookies: Vec<String>,
}

impl IntoResponse for AuthRelay {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self.body)).into_response();
        for cookie in self.cookies {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().append(header::SET_COOKIE, value);
                }
                Err(_) => warn!("Dropping unrepresentable Set-Cookie header from backend"),
            }
        }
        response
    }
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
}

/// API error type that converts domain errors to HTTP responses
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub request_id: Option<String>,
}

impl ApiError {
    /// The missing-credential short-circuit: 401 with a plain-text body
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".to_string(),
            request_id: None,
        }
    }

    /// Create from GatewayError
    pub fn from_gateway_error(err: crate::core::errors::GatewayError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            message: err.user_message(),
            request_id: None,
        }
    }

    /// Create from GatewayError with request ID
    pub fn from_gateway_error_with_id(
        err: crate::core::errors::GatewayError,
        request_id: String,
    ) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            message: err.user_message(),
            request_id: Some(request_id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Unauthorized stays plain text; everything else is JSON
        if self.status == StatusCode::UNAUTHORIZED {
            return (self.status, self.message).into_response();
        }
        let body = Json(ErrorResponse {
            error: self.message,
            request_id: self.request_id,
        });
        (self.status, body).into_response()
    }
}

impl From<crate::core::errors::GatewayError> for ApiError {
    fn from(err: crate::core::errors::GatewayError) -> Self {
        ApiError::from_gateway_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::GatewayError;

    #[tokio::test]
    async fn test_unauthorized_is_plain_text() {
        let response = ApiError::unauthorized().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/plain"));

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"Unauthorized");
    }

    #[tokio::test]
    async fn test_gateway_error_is_json() {
        let err = GatewayError::BackendUnreachable("refused".to_string());
        let response =
            ApiError::from_gateway_error_with_id(err, "req-1".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Backend unavailable");
        assert_eq!(body["request_id"], "req-1");
    }

    #[tokio::test]
    async fn test_relayed_empty_body() {
        let relayed = Relayed {
            status: 204,
            body: None,
        };
        let response = relayed.into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_auth_relay_appends_cookies() {
        let relay = AuthRelay {
            status: 200,
            body: serde_json::json!({"message": "Login successful"}),
            cookies: vec!["access_token=abc; HttpOnly; Path=/".to_string()],
        };
        let response = relay.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert_eq!(cookie, "access_token=abc; HttpOnly; Path=/");
    }
}
