//! product-api - An in-memory product catalog served over HTTP

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod observability;
