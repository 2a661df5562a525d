//! API Key Gate
//!
//! Compares a request header with the configured key. A request that fails
//! the check is answered here; the handler never runs. Nothing is retained
//! between requests.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::http_server::config::AuthConfig;
use crate::http_server::errors::ErrorBody;
use crate::http_server::state::AppState;

/// Invalid gate configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateConfigError {
    #[error("auth.header '{0}' is not a valid HTTP header name")]
    InvalidHeader(String),

    #[error("auth.api_key must not be empty")]
    MissingKey,
}

/// Why a request was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// Header absent or not valid text
    MissingKey,
    /// Header present but wrong
    InvalidKey,
}

impl AuthRejection {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthRejection::MissingKey => StatusCode::UNAUTHORIZED,
            AuthRejection::InvalidKey => StatusCode::FORBIDDEN,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthRejection::MissingKey => "Unauthorized: API key is missing.",
            AuthRejection::InvalidKey => "Forbidden: invalid API key.",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        ErrorBody::respond(self.status_code(), self.message())
    }
}

/// Shared-key check for the product routes
#[derive(Debug, Clone)]
pub struct ApiKeyGate {
    header: HeaderName,
    key: Vec<u8>,
}

impl ApiKeyGate {
    /// Build a gate from configuration
    pub fn from_config(config: &AuthConfig) -> Result<Self, GateConfigError> {
        let header = config
            .header_name()
            .ok_or_else(|| GateConfigError::InvalidHeader(config.header.clone()))?;
        if config.api_key.is_empty() {
            return Err(GateConfigError::MissingKey);
        }
        Ok(Self {
            header,
            key: config.api_key.as_bytes().to_vec(),
        })
    }

    /// Header the gate reads
    pub fn header(&self) -> &HeaderName {
        &self.header
    }

    /// Check the request headers
    pub fn check(&self, headers: &HeaderMap) -> Result<(), AuthRejection> {
        let presented = headers
            .get(&self.header)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthRejection::MissingKey)?;

        let matches: bool = presented.as_bytes().ct_eq(self.key.as_slice()).into();
        if matches {
            Ok(())
        } else {
            Err(AuthRejection::InvalidKey)
        }
    }
}

/// Middleware entry point
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match state.gate.check(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(rejection) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                status = rejection.status_code().as_u16(),
                "request rejected by api key gate"
            );
            rejection.into_response()
        }
    }
}
