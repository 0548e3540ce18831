// Common test utilities and helpers for all test modules

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::Router;
use taskgate::api::responses::{AuthRelay, Relayed};
use taskgate::api::{create_router, AppState, BackendClient, TaskOperation};
use taskgate::config::Config;
use taskgate::core::errors::GatewayError;
use taskgate::core::models::{LoginForm, RegisterRequest};
use taskgate::session::SessionCredential;

/// Mock BackendClient that records calls and serves canned responses
///
/// `calls` counts every outbound call the handlers attempt; the
/// unauthorized short-circuit must leave it at zero.
pub struct MockBackendClient {
    pub calls: AtomicUsize,
    pub task_response: Result<Relayed, String>,
    pub auth_response: Result<AuthRelay, String>,
    pub register_response: Result<Relayed, String>,
    pub ping_result: Result<(), String>,
}

impl Default for MockBackendClient {
    fn default() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            task_response: Ok(Relayed {
                status: 200,
                body: Some(serde_json::json!([])),
            }),
            auth_response: Ok(AuthRelay {
                status: 200,
                body: serde_json::json!({"message": "ok"}),
                cookies: vec![],
            }),
            register_response: Ok(Relayed {
                status: 200,
                body: Some(serde_json::json!({"id": 1, "email": "user@example.com", "tasks": []})),
            }),
            ping_result: Ok(()),
        }
    }
}

impl MockBackendClient {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BackendClient for MockBackendClient {
    async fn forward_task(
        &self,
        _credential: &SessionCredential,
        _operation: TaskOperation,
    ) -> Result<Relayed, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.task_response
            .clone()
            .map_err(GatewayError::BackendUnreachable)
    }

    async fn login(&self, _form: &LoginForm) -> Result<AuthRelay, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.auth_response
            .clone()
            .map_err(GatewayError::BackendUnreachable)
    }

    async fn register(&self, _registration: &RegisterRequest) -> Result<Relayed, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.register_response
            .clone()
            .map_err(GatewayError::BackendUnreachable)
    }

    async fn logout(&self, _credential: &SessionCredential) -> Result<AuthRelay, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.auth_response
            .clone()
            .map_err(GatewayError::BackendUnreachable)
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        self.ping_result
            .clone()
            .map_err(GatewayError::BackendUnreachable)
    }
}

/// Build a router over the given mock backend with test configuration
pub fn test_router(backend: Arc<MockBackendClient>) -> Router {
    let app_state = AppState {
        backend,
        config: Arc::new(Config::test_config()),
    };
    create_router(app_state)
}
