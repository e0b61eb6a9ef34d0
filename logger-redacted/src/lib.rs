//! Patient-safe logging for the billing engine
//!
//! Every formatted log line passes through a [`PiiRedactor`] before it reaches
//! the output, so patient contact data that ends up in an event message or a
//! structured field is masked on the way out.
//!
//! # Detected Data Types
//!
//! - **Email Addresses**: joao.silva@email.com → j***@e***
//! - **Phone Numbers**: (11) 99999-9999 → (**) *****-****
//! - **CPF**: 123.456.789-09 → ***.***.***-**
//! - **CEP (zip codes)**: 01234-567 → *****-***
//! - **Custom Patterns**: configurable, e.g. insurance card numbers
//!
//! With `hash_for_correlation` enabled, matches are replaced by a short
//! SHA-256 digest instead (`EMAIL[mJ0x...]`) so the same patient can still be
//! followed across log lines.
//!
//! # Example
//!
//! ```rust,no_run
//! use logger_redacted::{init_tracing, LoggerConfig};
//!
//! let config = LoggerConfig::default();
//! init_tracing(&config, "billing_service=debug").expect("logger setup");
//!
//! tracing::info!("Patient joao.silva@email.com registered");
//! // Output: "Patient EMAIL[...] registered"
//! ```
//!
//! # Configuration
//!
//! ```yaml
//! logging:
//!   log_level: info
//!   json: false
//!   redaction_enabled: true
//!   redaction:
//!     redact_emails: true
//!     redact_phones: true
//!     redact_cpf: true
//!     redact_zip_codes: true
//!     hash_for_correlation: true
//!     custom_patterns:
//!       - pattern: "\\bCARD-\\d+"
//!         replacement: "CARD-[REDACTED]"
//! ```

pub mod redactor;
pub mod writer;
pub mod config;
pub mod init;

pub use redactor::*;
pub use writer::*;
pub use config::*;
pub use init::*;
