//! Common error handling utilities for the hospital billing engine
//!
//! Library crates define their own domain errors (`BillingError`,
//! `RedactionError`, `ConfigError`). Binaries fold them into [`AppError`] so
//! that startup and serving failures surface through one type.
//!
//! # Example
//!
//! ```rust
//! use error_common::{AppError, Result};
//!
//! fn port_from(raw: &str) -> Result<u16> {
//!     raw.parse::<u16>()
//!         .map_err(|e| AppError::ConfigError(format!("invalid port {raw:?}: {e}")))
//! }
//!
//! assert!(port_from("8080").is_ok());
//! assert!(port_from("http").is_err());
//! ```

pub mod types;

pub use types::*;
