// HTTP client for relaying browser calls to the backend API

use crate::api::responses::{AuthRelay, Relayed};
use crate::api::{BackendClient, TaskOperation};
use crate::core::errors::GatewayError;
use crate::core::models::{LoginForm, RegisterRequest};
use crate::session::SessionCredential;
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use std::time::Duration;
use tracing::{debug, error};

/// Relay client for the backend API
///
/// Holds a pooled `reqwest::Client` and the backend base URL, injected at
/// construction from configuration. Each call performs exactly one outbound
/// request: no retries, no caching, no local recovery.
pub struct HttpBackendClient {
    http_client: Client,
    base_url: String,
}

impl HttpBackendClient {
    /// Create a new relay client with connection pooling
    ///
    /// # Arguments
    /// * `base_url` - backend base URL from configuration
    /// * `timeout_secs` - per-request timeout in seconds
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, GatewayError> {
        let timeout = Duration::from_secs(timeout_secs);
        let connect_timeout = Duration::from_secs(2); // Fail fast on connection

        let http_client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| {
                GatewayError::ConfigurationError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn transport_error(error: reqwest::Error) -> GatewayError {
        if error.is_timeout() {
            GatewayError::BackendUnreachable("request timed out".to_string())
        } else if error.is_connect() {
            GatewayError::BackendUnreachable("connection failed".to_string())
        } else {
            GatewayError::BackendUnreachable(format!("request failed: {}", error))
        }
    }

    /// Relay status + JSON body. Backend error statuses are relayed too;
    /// only an undecodable body is a gateway failure.
    async fn relay_json(&self, response: Response) -> Result<Relayed, GatewayError> {
        let status = response.status().as_u16();
        let body = response.json().await.map_err(|e| {
            error!(status = status, error = %e, "Failed to decode backend response body");
            GatewayError::InvalidBackendResponse(format!("undecodable body: {}", e))
        })?;
        Ok(Relayed {
            status,
            body: Some(body),
        })
    }

    /// Relay status + JSON body + Set-Cookie headers for the auth flows
    async fn relay_auth(&self, response: Response) -> Result<AuthRelay, GatewayError> {
        let status = response.status().as_u16();
        let cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect();
        let body = response.json().await.map_err(|e| {
            error!(status = status, error = %e, "Failed to decode backend auth response");
            GatewayError::InvalidBackendResponse(format!("undecodable body: {}", e))
        })?;
        Ok(AuthRelay {
            status,
            body,
            cookies,
        })
    }
}

#[async_trait]
impl BackendClient for HttpBackendClient {
    async fn forward_task(
        &self,
        credential: &SessionCredential,
        operation: TaskOperation,
    ) -> Result<Relayed, GatewayError> {
        let request = match &operation {
            TaskOperation::List => self.http_client.get(self.endpoint("/tasks/")),
            TaskOperation::Create { body } => {
                self.http_client.post(self.endpoint("/tasks/")).json(body)
            }
            TaskOperation::Update { id, body } => self
                .http_client
                .put(self.endpoint(&format!("/tasks/{}", id)))
                .json(body),
            TaskOperation::Delete { id } => self
                .http_client
                .delete(self.endpoint(&format!("/tasks/{}", id))),
        };

        debug!(operation = operation_name(&operation), "Forwarding task call to backend");

        let response = request
            .header(header::COOKIE, credential.to_cookie_header())
            .send()
            .await
            .map_err(Self::transport_error)?;

        // Delete relays the status alone; a 204 body must never be parsed
        if matches!(operation, TaskOperation::Delete { .. }) {
            return Ok(Relayed {
                status: response.status().as_u16(),
                body: None,
            });
        }

        self.relay_json(response).await
    }

    async fn login(&self, form: &LoginForm) -> Result<AuthRelay, GatewayError> {
        let response = self
            .http_client
            .post(self.endpoint("/token"))
            .form(form)
            .send()
            .await
            .map_err(Self::transport_error)?;

        self.relay_auth(response).await
    }

    async fn register(&self, registration: &RegisterRequest) -> Result<Relayed, GatewayError> {
        let response = self
            .http_client
            .post(self.endpoint("/users/"))
            .json(registration)
            .send()
            .await
            .map_err(Self::transport_error)?;

        self.relay_json(response).await
    }

    async fn logout(&self, credential: &SessionCredential) -> Result<AuthRelay, GatewayError> {
        let response = self
            .http_client
            .post(self.endpoint("/logout"))
            .header(header::COOKIE, credential.to_cookie_header())
            .send()
            .await
            .map_err(Self::transport_error)?;

        self.relay_auth(response).await
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        // The backend has no dedicated health route; any HTTP answer from
        // the base URL counts as reachable.
        self.http_client
            .get(self.endpoint("/"))
            .send()
            .await
            .map(|_| ())
            .map_err(Self::transport_error)
    }
}

fn operation_name(operation: &TaskOperation) -> &'static str {
    match operation {
        TaskOperation::List => "list",
        TaskOperation::Create { .. } => "create",
        TaskOperation::Update { .. } => "update",
        TaskOperation::Delete { .. } => "delete",
    }
}
