//! In-memory product store
//!
//! The store owns the ordered product collection. Callers take a read or
//! write guard and perform their whole interaction through it, so a lookup
//! followed by a replace or remove cannot interleave with another request.
//!
//! The store does not check id uniqueness on append; ids come from an
//! [`IdGenerator`](super::IdGenerator) and are fresh by construction.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use super::product::Product;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store failures. Neither is reachable through well-behaved callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A thread panicked while holding the lock
    #[error("product store lock poisoned")]
    Poisoned,

    /// Index past the end of the collection
    #[error("index {index} out of bounds for {len} products")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Process-wide product collection
#[derive(Debug, Default)]
pub struct ProductStore {
    products: RwLock<Vec<Product>>,
}

impl ProductStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `products` in the given order
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    /// Create a store holding the sample catalog
    pub fn seeded() -> Self {
        Self::with_products(super::seed::sample_products())
    }

    /// Take a shared read guard
    pub fn read(&self) -> StoreResult<StoreReader<'_>> {
        let guard = self.products.read().map_err(|_| StoreError::Poisoned)?;
        Ok(StoreReader { guard })
    }

    /// Take the exclusive write guard
    pub fn write(&self) -> StoreResult<StoreWriter<'_>> {
        let guard = self.products.write().map_err(|_| StoreError::Poisoned)?;
        Ok(StoreWriter { guard })
    }

    /// Owned copy of the whole collection
    pub fn snapshot(&self) -> StoreResult<Vec<Product>> {
        Ok(self.read()?.list().to_vec())
    }

    /// Owned copy of one product
    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.read()?.find_by_id(id).cloned())
    }

    /// Number of stored products
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.list().len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn position(products: &[Product], id: &str) -> Option<usize> {
    products.iter().position(|p| p.id == id)
}

/// Read access to the collection
pub struct StoreReader<'a> {
    guard: RwLockReadGuard<'a, Vec<Product>>,
}

impl StoreReader<'_> {
    /// The full ordered collection
    pub fn list(&self) -> &[Product] {
        &self.guard
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.guard.iter().find(|p| p.id == id)
    }

    pub fn find_index_by_id(&self, id: &str) -> Option<usize> {
        position(&self.guard, id)
    }
}

/// Exclusive access to the collection
pub struct StoreWriter<'a> {
    guard: RwLockWriteGuard<'a, Vec<Product>>,
}

impl StoreWriter<'_> {
    /// The full ordered collection
    pub fn list(&self) -> &[Product] {
        &self.guard
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.guard.iter().find(|p| p.id == id)
    }

    pub fn find_index_by_id(&self, id: &str) -> Option<usize> {
        position(&self.guard, id)
    }

    /// Add a product at the end of the collection
    pub fn append(&mut self, product: Product) {
        tracing::debug!(id = %product.id, "product appended");
        self.guard.push(product);
    }

    /// Replace the product at `index`, keeping its position
    pub fn replace_at(&mut self, index: usize, product: Product) -> StoreResult<&Product> {
        let len = self.guard.len();
        let slot = self
            .guard
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfBounds { index, len })?;
        tracing::debug!(id = %product.id, index, "product replaced");
        *slot = product;
        Ok(&*slot)
    }

    /// Remove and return the product at `index`
    pub fn remove_at(&mut self, index: usize) -> StoreResult<Product> {
        let len = self.guard.len();
        if index >= len {
            return Err(StoreError::IndexOutOfBounds { index, len });
        }
        let removed = self.guard.remove(index);
        tracing::debug!(id = %removed.id, index, "product removed");
        Ok(removed)
    }
}
