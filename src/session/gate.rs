// Session gate middleware for the page routes

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::session::{classify, RouteClass, SessionCredential};

/// Gate page access on session-cookie presence
///
/// - No credential on a protected page: redirect to the login page.
/// - Credential on an auth page: redirect to the home page.
/// - Anything else passes through unchanged.
///
/// Stateless; every request is re-evaluated independently. Only cookie
/// presence is tested - validity is the backend's concern.
pub async fn session_gate(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let authenticated = SessionCredential::from_headers(request.headers()).is_some();

    match classify(path) {
        Some(RouteClass::Protected) if !authenticated => {
            debug!(path = %path, "No session cookie, redirecting to login");
            Redirect::temporary("/login").into_response()
        }
        Some(RouteClass::Auth) if authenticated => {
            debug!(path = %path, "Session cookie present, redirecting to home");
            Redirect::temporary("/").into_response()
        }
        _ => next.run(request).await,
    }
}
