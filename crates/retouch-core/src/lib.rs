//! Retouch Core Library
//!
//! This crate provides the configuration and error types shared by the
//! processing library and the HTTP API.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{Config, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
