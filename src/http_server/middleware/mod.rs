//! Request Middleware
//!
//! Stages run ahead of the product handlers, outermost first:
//!
//! - `logger` - records every request, always continues
//! - `auth` - shared API key check on the product routes
//! - `validator` - structural payload check on create and update

pub mod auth;
pub mod logger;
pub mod validator;
