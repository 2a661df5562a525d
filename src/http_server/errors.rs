//! # API Errors
//!
//! Typed request failures and their translation to HTTP responses.
//!
//! `ApiError::into_response` is the single place where a failed request
//! becomes a wire response: it logs the failure, resolves the status and
//! writes `{ "error": <message> }`.

use std::any::Any;

use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::StoreError;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Wire message for every 5xx response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Request failures raised by handlers
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Lookup by id failed
    #[error("{0}")]
    NotFound(String),

    /// Payload passed the type check but is incomplete
    #[error("{0}")]
    Validation(String),

    /// Malformed list query parameter
    #[error("{0}")]
    InvalidQuery(String),

    /// Body could not be deserialized
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// No route matched the request
    #[error("Route not found.")]
    RouteNotFound,

    /// The path exists but not for this method
    #[error("Method not allowed.")]
    MethodNotAllowed,

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn product_not_found() -> Self {
        Self::NotFound("Product not found.".to_string())
    }

    pub fn missing_fields() -> Self {
        Self::Validation("All product fields are required.".to_string())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidQuery(_) | ApiError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message written to the response body
    ///
    /// Server-side details stay in the log.
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidBody(e.to_string())
    }
}

/// Error response body shared by every failure path
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Build a response with this body and the given status
    pub fn respond(status: StatusCode, message: impl Into<String>) -> Response {
        (status, Json(Self::new(message))).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request failed");
        }
        ErrorBody::respond(status, self.public_message())
    }
}

/// Panic handler for `CatchPanicLayer`: the generic 500 fallback
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(detail).into_response()
}

/// Fallback handler for unmatched routes
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Rewrite the router's bare 405 into an error body
///
/// The `Allow` header produced by the router is kept.
pub async fn method_not_allowed(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rewritten = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}
