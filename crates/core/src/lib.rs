//! Enrichment Service Core Library
//!
//! This crate provides the foundational utilities for the prompt enrichment
//! service:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Layered configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logging;
