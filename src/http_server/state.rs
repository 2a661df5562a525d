//! Shared router state

use std::sync::Arc;

use crate::catalog::{IdGenerator, ProductStore, UuidIds};

use super::middleware::auth::ApiKeyGate;

/// State shared by the product handlers and the auth gate
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProductStore>,
    pub ids: Arc<dyn IdGenerator>,
    pub gate: Arc<ApiKeyGate>,
}

impl AppState {
    /// State over `store` with UUID ids
    pub fn new(store: ProductStore, gate: ApiKeyGate) -> Self {
        Self {
            store: Arc::new(store),
            ids: Arc::new(UuidIds),
            gate: Arc::new(gate),
        }
    }

    /// Replace the id generator
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }
}
