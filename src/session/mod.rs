// Session credential extraction and route classification

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::api::responses::ApiError;

pub mod gate;

/// Name of the cookie the backend sets on login
pub const SESSION_COOKIE: &str = "access_token";

/// Opaque session token carried in the `access_token` cookie
///
/// Never parsed or validated here: presence is the only property this layer
/// tests, and the value is forwarded to the backend verbatim. An expired or
/// forged token still counts as present; the backend rejects it and that
/// rejection is relayed like any other backend status.
#[derive(Debug, Clone)]
pub struct SessionCredential(String);

impl SessionCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Read the session cookie from a request's headers
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let raw = headers.get(header::COOKIE)?.to_str().ok()?;
        cookie_value(raw, SESSION_COOKIE).map(Self)
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Render the credential as the `Cookie` header value for backend calls
    pub fn to_cookie_header(&self) -> String {
        format!("{}={}", SESSION_COOKIE, self.0)
    }
}

/// Extractor for the proxy routes: absence of the cookie short-circuits to
/// 401 before any handler code runs. Independent of the page gate.
#[async_trait]
impl<S> FromRequestParts<S> for SessionCredential
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers).ok_or_else(ApiError::unauthorized)
    }
}

/// Find a cookie by name in a `Cookie` header value
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Static classification of the gated page routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Pages that require a session (the task list)
    Protected,
    /// Pages for anonymous visitors (login, register)
    Auth,
}

/// Classify a request path. Paths outside the gated set return `None` and
/// pass through the gate untouched.
pub fn classify(path: &str) -> Option<RouteClass> {
    if path == "/" {
        Some(RouteClass::Protected)
    } else if path.starts_with("/login") || path.starts_with("/register") {
        Some(RouteClass::Auth)
    } else {
        None
    }
}
