// Wire shapes of the backend contract
//
// The relay forwards task bodies opaquely as `serde_json::Value`; the typed
// shapes here document the contract and back the test assertions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task as the backend returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub owner_id: i64,
}

/// Credentials the login page submits; re-encoded as a form for the
/// backend token endpoint, which expects `username`/`password` fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Registration payload for the backend user endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Error body the backend attaches to rejected requests.
/// Relayed verbatim; the gateway never rewrites it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}
