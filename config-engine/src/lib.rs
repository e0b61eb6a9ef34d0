//! Layered configuration loading for the hospital billing engine
//!
//! Sources are applied in the order they are added; later sources override
//! earlier ones key by key. The usual stack is an optional file followed by
//! prefixed environment variables.
//!
//! # Supported Sources
//!
//! - **Local Files**: YAML, TOML, JSON (format picked from the extension)
//! - **Environment Variables**: `PREFIX__SECTION__KEY=value`
//!
//! # Example
//!
//! ```rust,no_run
//! use config_engine::{ConfigEngine, ConfigSource, Validate};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Default)]
//! #[serde(default)]
//! struct AppConfig {
//!     port: u16,
//! }
//!
//! impl Validate for AppConfig {}
//!
//! let config: AppConfig = ConfigEngine::new()
//!     .add_source(ConfigSource::optional_file("billing.yaml"))
//!     .add_source(ConfigSource::env("HBILL"))
//!     .load()
//!     .expect("configuration");
//! ```

pub mod engine;
pub mod providers;
pub mod validation;
pub mod error;

pub use engine::*;
pub use providers::*;
pub use validation::*;
pub use error::*;
