// Domain error types - backend failures stay in the logs, not in responses

use thiserror::Error;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No session cookie on the incoming request (HTTP 401)
    #[error("Missing session credential")]
    MissingCredential,

    /// The backend could not be reached (HTTP 502)
    #[error("Backend unreachable: {0}")]
    BackendUnreachable(String),

    /// The backend replied with a body the relay could not decode (HTTP 502)
    #[error("Invalid backend response: {0}")]
    InvalidBackendResponse(String),

    /// Configuration error (HTTP 500)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl GatewayError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::MissingCredential => 401,
            GatewayError::BackendUnreachable(_) => 502,
            GatewayError::InvalidBackendResponse(_) => 502,
            GatewayError::ConfigurationError(_) => 500,
        }
    }

    /// Get user-friendly error message (no sensitive information)
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::MissingCredential => "Unauthorized".to_string(),
            GatewayError::BackendUnreachable(_) => "Backend unavailable".to_string(),
            GatewayError::InvalidBackendResponse(_) => "Backend unavailable".to_string(),
            GatewayError::ConfigurationError(_) => "Internal error".to_string(),
        }
    }
}
