//! # HTTP Server
//!
//! Assembles the request pipeline and serves it.
//!
//! Every request passes the panic catcher, CORS and the request logger;
//! product routes add the API key gate and, for create and update, the
//! structural validator. A bare 405 from the router is rewritten into
//! the usual error body on the way out.

use std::net::SocketAddr;

use axum::{middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::errors::{method_not_allowed, panic_response, route_not_found};
use super::middleware::logger::log_request;
use super::product_routes::product_routes;
use super::state::AppState;

/// Plain-text body of `GET /`
pub const WELCOME_MESSAGE: &str =
    "Welcome to the Product API! Go to /products to see all products.";

/// HTTP Server for the product API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `state`
    pub fn new(config: HttpServerConfig, state: AppState) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process ends
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "product API listening");

        axum::serve(listener, self.router).await
    }
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full router
pub fn build_router(config: &HttpServerConfig, state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .merge(product_routes(state))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(cors_layer(config))
                .layer(from_fn(log_request))
                .layer(from_fn(method_not_allowed)),
        )
}

async fn welcome_handler() -> &'static str {
    WELCOME_MESSAGE
}
