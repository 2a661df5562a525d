//! # Product Catalog
//!
//! The product entity, its in-memory store and id generation.

mod ids;
mod product;
mod seed;
mod store;

pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use product::{canonical_price, Product, ProductDraft};
pub use seed::sample_products;
pub use store::{ProductStore, StoreError, StoreReader, StoreResult, StoreWriter};
