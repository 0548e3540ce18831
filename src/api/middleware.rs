// Middleware layers shared by all routes

use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Tracing middleware
///
/// Structured request logging: method, path, status, duration.
pub fn tracing_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
> {
    TraceLayer::new_for_http()
}

/// Body size limit middleware
///
/// Returns 413 Payload Too Large if exceeded. Task payloads are small;
/// the limit comes from configuration.
pub fn body_size_limit_layer(limit_bytes: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(limit_bytes)
}
