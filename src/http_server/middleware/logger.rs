//! Request logging stage

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Log method and path, then hand the request on unchanged
pub async fn log_request(request: Request, next: Next) -> Response {
    tracing::info!(
        method = %request.method(),
        path = %request.uri().path(),
        "request"
    );
    next.run(request).await
}
