// Axum web server layer

use axum::{
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::{get, post, put},
    BoxError, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;

pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod responses;

use crate::api::responses::{AuthRelay, Relayed};
use crate::core::errors::GatewayError;
use crate::core::models::{LoginForm, RegisterRequest};
use crate::session::gate::session_gate;
use crate::session::SessionCredential;

// Re-export Config from config module
pub use crate::config::Config;

/// Application state containing all shared dependencies
///
/// Components are wrapped in Arc for shared ownership across async tasks
/// and must be Send + Sync. There is no other state: every request is
/// handled independently.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BackendClient + Send + Sync>,
    pub config: Arc<Config>,
}

/// One task-relay operation, as received from the browser-facing routes
#[derive(Debug, Clone)]
pub enum TaskOperation {
    List,
    Create { body: serde_json::Value },
    Update { id: i64, body: serde_json::Value },
    Delete { id: i64 },
}

/// Trait for the backend relay client
///
/// Every method performs at most one outbound call. The credential is an
/// explicit parameter on each authenticated call; implementations attach it
/// as a `Cookie` header and never interpret it.
#[async_trait::async_trait]
pub trait BackendClient: Send + Sync {
    /// Forward a task CRUD call and relay the backend's answer.
    /// Delete relays the status alone; other operations relay status + JSON body.
    async fn forward_task(
        &self,
        credential: &SessionCredential,
        operation: TaskOperation,
    ) -> Result<Relayed, GatewayError>;

    /// Exchange login credentials for a session cookie (backend `POST /token`)
    async fn login(&self, form: &LoginForm) -> Result<AuthRelay, GatewayError>;

    /// Create a user account (backend `POST /users/`)
    async fn register(&self, registration: &RegisterRequest) -> Result<Relayed, GatewayError>;

    /// Clear the session cookie (backend `POST /logout`)
    async fn logout(&self, credential: &SessionCredential) -> Result<AuthRelay, GatewayError>;

    /// Reachability probe for the health endpoint
    async fn ping(&self) -> Result<(), GatewayError>;
}

/// Create the Axum router with all routes and middleware
///
/// Middleware stack (outermost to innermost):
/// - Request timeout (tower::timeout behind HandleErrorLayer)
/// - Body size limit (tower-http::limit)
/// - Tracing (tower-http::trace)
/// - Session gate (applied to the page routes only, via route_layer)
///
/// `/health` and the `/api/*` routes bypass the gate; the proxy routes
/// enforce credential presence themselves through the extractor.
pub fn create_router(app_state: AppState) -> Router {
    let page_routes = Router::new()
        .route("/", get(pages::home_page))
        .route("/login", get(pages::login_page))
        .route("/register", get(pages::register_page))
        .route_layer(axum::middleware::from_fn(session_gate));

    let proxy_routes = Router::new()
        .route(
            "/api/tasks",
            get(handlers::list_tasks_handler).post(handlers::create_task_handler),
        )
        .route(
            "/api/tasks/:id",
            put(handlers::update_task_handler).delete(handlers::delete_task_handler),
        )
        .route("/api/auth/login", post(handlers::login_handler))
        .route("/api/auth/register", post(handlers::register_handler))
        .route("/api/auth/logout", post(handlers::logout_handler));

    let body_limit = app_state.config.body_size_limit_bytes;
    let timeout_secs = app_state.config.request_timeout_secs;

    let router = Router::new()
        .merge(page_routes)
        .merge(proxy_routes)
        .route("/health", get(handlers::health_handler))
        .layer(middleware::tracing_layer())
        .layer(middleware::body_size_limit_layer(body_limit));

    // HandleErrorLayer must come BEFORE timeout to catch the timeout error
    // and convert it to an HTTP response
    let timeout_stack = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|e: BoxError| async move {
            let status = if e.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string())
        }))
        .timeout(Duration::from_secs(timeout_secs))
        .into_inner();

    router.layer(timeout_stack).with_state(app_state)
}
