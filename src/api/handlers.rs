// Request handlers for the proxy routes

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
    Form,
};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::api::responses::{ApiError, AuthRelay, HealthResponse, Relayed};
use crate::api::{AppState, TaskOperation};
use crate::core::models::{LoginForm, RegisterRequest};
use crate::session::SessionCredential;

/// Extract request ID from headers or generate a fresh UUID
fn request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// Relay one task operation to the backend and convert failures at the edge
async fn relay_task(
    app_state: &AppState,
    credential: &SessionCredential,
    operation: TaskOperation,
    request_id: String,
) -> Result<Relayed, ApiError> {
    let relayed = app_state
        .backend
        .forward_task(credential, operation)
        .await
        .map_err(|e| {
            error!(error = %e, request_id = %request_id, "Task relay failed");
            ApiError::from_gateway_error_with_id(e, request_id.clone())
        })?;

    debug!(
        status = relayed.status,
        request_id = %request_id,
        "Backend response relayed"
    );
    Ok(relayed)
}

/// List the caller's tasks
///
/// GET /api/tasks -> backend GET /tasks/
pub async fn list_tasks_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    credential: SessionCredential,
) -> Result<Relayed, ApiError> {
    let request_id = request_id(&headers);
    info!(request_id = %request_id, "Relaying task list");
    relay_task(&app_state, &credential, TaskOperation::List, request_id).await
}

/// Create a task
///
/// POST /api/tasks -> backend POST /tasks/
/// The body is forwarded opaquely; the backend owns validation.
pub async fn create_task_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    credential: SessionCredential,
    Json(body): Json<serde_json::Value>,
) -> Result<Relayed, ApiError> {
    let request_id = request_id(&headers);
    info!(request_id = %request_id, "Relaying task creation");
    relay_task(
        &app_state,
        &credential,
        TaskOperation::Create { body },
        request_id,
    )
    .await
}

/// Update a task (partial fields, e.g. the completion flag)
///
/// PUT /api/tasks/:id -> backend PUT /tasks/{id}
pub async fn update_task_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    credential: SessionCredential,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<Relayed, ApiError> {
    let request_id = request_id(&headers);
    info!(task_id = id, request_id = %request_id, "Relaying task update");
    relay_task(
        &app_state,
        &credential,
        TaskOperation::Update { id, body },
        request_id,
    )
    .await
}

/// Delete a task
///
/// DELETE /api/tasks/:id -> backend DELETE /tasks/{id}
/// Relays the status code alone with an empty body.
pub async fn delete_task_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    credential: SessionCredential,
    Path(id): Path<i64>,
) -> Result<Relayed, ApiError> {
    let request_id = request_id(&headers);
    info!(task_id = id, request_id = %request_id, "Relaying task deletion");
    relay_task(
        &app_state,
        &credential,
        TaskOperation::Delete { id },
        request_id,
    )
    .await
}

/// Log in against the backend token endpoint
///
/// POST /api/auth/login (form-encoded) -> backend POST /token
/// Relays the backend's Set-Cookie headers so the session cookie is
/// first-party; no credential required (this is how one is obtained).
pub async fn login_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<AuthRelay, ApiError> {
    let request_id = request_id(&headers);
    info!(request_id = %request_id, "Relaying login");

    let relay = app_state.backend.login(&form).await.map_err(|e| {
        error!(error = %e, request_id = %request_id, "Login relay failed");
        ApiError::from_gateway_error_with_id(e, request_id.clone())
    })?;

    debug!(status = relay.status, request_id = %request_id, "Login response relayed");
    Ok(relay)
}

/// Register a new account
///
/// POST /api/auth/register -> backend POST /users/
pub async fn register_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(registration): Json<RegisterRequest>,
) -> Result<Relayed, ApiError> {
    let request_id = request_id(&headers);
    info!(request_id = %request_id, "Relaying registration");

    let relayed = app_state
        .backend
        .register(&registration)
        .await
        .map_err(|e| {
            error!(error = %e, request_id = %request_id, "Registration relay failed");
            ApiError::from_gateway_error_with_id(e, request_id.clone())
        })?;

    debug!(status = relayed.status, request_id = %request_id, "Registration response relayed");
    Ok(relayed)
}

/// Log out: the backend clears the session cookie
///
/// POST /api/auth/logout -> backend POST /logout
pub async fn logout_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    credential: SessionCredential,
) -> Result<AuthRelay, ApiError> {
    let request_id = request_id(&headers);
    info!(request_id = %request_id, "Relaying logout");

    let relay = app_state.backend.logout(&credential).await.map_err(|e| {
        error!(error = %e, request_id = %request_id, "Logout relay failed");
        ApiError::from_gateway_error_with_id(e, request_id.clone())
    })?;

    Ok(relay)
}

/// Health check handler
///
/// GET /health
///
/// Reports gateway liveness plus backend reachability. The probe is bounded
/// so a slow backend cannot stall the health endpoint.
pub async fn health_handler(
    State(app_state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiError> {
    let backend_status = match tokio::time::timeout(
        Duration::from_millis(800),
        app_state.backend.ping(),
    )
    .await
    {
        Ok(Ok(())) => "connected".to_string(),
        Ok(Err(e)) => {
            warn!(error = %e, "Backend ping failed");
            format!("unreachable: {}", e.user_message())
        }
        Err(_) => "unreachable: timeout".to_string(),
    };

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        backend: backend_status,
    }))
}
