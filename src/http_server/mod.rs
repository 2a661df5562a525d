//! # Product HTTP Server Module
//!
//! HTTP API over the in-memory product catalog.
//!
//! # Endpoints
//!
//! - `GET /` - Welcome text
//! - `GET /products` - Filtered, paginated listing
//! - `GET /products/stats` - Counts per category
//! - `GET|PUT|DELETE /products/:id` - Single product
//! - `POST /products` - Create

pub mod config;
pub mod errors;
pub mod middleware;
pub mod product_routes;
pub mod response;
pub mod server;
pub mod state;

pub use config::{AuthConfig, HttpServerConfig};
pub use errors::{ApiError, ApiResult};
pub use middleware::auth::{ApiKeyGate, GateConfigError};
pub use server::{build_router, HttpServer};
pub use state::AppState;
