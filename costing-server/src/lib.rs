//! HTTP surface of the costing calculator.
//!
//! `POST /api/costeo` accepts pre-summed totals and a method name and answers
//! with the single computed result.

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use server::{create_router, start_server};
