//! Shared types, errors, and configuration for Copro.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Lenient amount and weight parsing for ingestion boundaries
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CoproConfig, LoggingConfig, ServerConfig};
pub use error::{AppError, AppResult};
