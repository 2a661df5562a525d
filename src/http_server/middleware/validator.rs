//! Structural Product Validation
//!
//! Runs before create and update. The body must be a JSON object whose
//! product fields carry the right JSON types; a missing field counts as a
//! mismatch. Values are not inspected, so an empty `name` passes here and
//! is caught later by the handler's completeness check.
//!
//! Failures are answered directly with a 400 and never reach the handler.
//! A body that passes is parsed exactly once: the decoded value travels to
//! the handler as a [`CheckedProduct`] request extension.

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::Request;
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use serde_json::{Map, Value};

use crate::http_server::errors::ErrorBody;

/// Message for every structural rejection
pub const INVALID_PRODUCT_MESSAGE: &str =
    "Invalid product data. Please check the types of each field.";

/// Largest body the stage will buffer
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// JSON type a product field must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    String,
    Number,
    Boolean,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

const PRODUCT_FIELDS: [(&str, FieldKind); 5] = [
    ("name", FieldKind::String),
    ("description", FieldKind::String),
    ("price", FieldKind::Number),
    ("category", FieldKind::String),
    ("inStock", FieldKind::Boolean),
];

/// Why a body failed the structural check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeViolation {
    NotJsonContent,
    NotJson,
    NotAnObject,
    WrongType(&'static str),
}

/// Check the decoded body against the product shape
pub fn check_product_shape(body: &Value) -> Result<(), ShapeViolation> {
    let object: &Map<String, Value> = body.as_object().ok_or(ShapeViolation::NotAnObject)?;

    for (field, kind) in PRODUCT_FIELDS {
        let ok = object.get(field).map(|v| kind.matches(v)).unwrap_or(false);
        if !ok {
            return Err(ShapeViolation::WrongType(field));
        }
    }
    Ok(())
}

fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Body that passed the structural check
#[derive(Debug, Clone)]
pub struct CheckedProduct(pub Value);

fn inspect(headers: &HeaderMap, bytes: &Bytes) -> Result<Value, ShapeViolation> {
    if !is_json_content(headers) {
        return Err(ShapeViolation::NotJsonContent);
    }
    let value: Value = serde_json::from_slice(bytes).map_err(|_| ShapeViolation::NotJson)?;
    check_product_shape(&value)?;
    Ok(value)
}

fn reject(violation: ShapeViolation) -> Response {
    tracing::debug!(?violation, "product payload rejected");
    ErrorBody::respond(StatusCode::BAD_REQUEST, INVALID_PRODUCT_MESSAGE)
}

/// Middleware entry point
///
/// The body is buffered and checked. The raw bytes are handed on intact
/// and the decoded value rides along as an extension.
pub async fn validate_product(request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return reject(ShapeViolation::NotJson),
    };

    match inspect(&parts.headers, &bytes) {
        Ok(value) => {
            parts.extensions.insert(CheckedProduct(value));
        }
        Err(violation) => return reject(violation),
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
