use std::sync::Arc;

use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggerConfig;
use crate::redactor::{PiiRedactor, RedactionError};
use crate::writer::RedactingMakeWriter;

/// Build the env filter: `RUST_LOG` wins, otherwise the configured level plus
/// any crate-specific directives.
pub fn env_filter(config: &LoggerConfig, directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if directives.is_empty() {
            EnvFilter::new(&config.log_level)
        } else {
            EnvFilter::new(format!("{},{}", config.log_level, directives))
        }
    })
}

/// Install the global tracing subscriber with redacted stdout output.
///
/// # Errors
///
/// Fails when a custom redaction pattern does not compile or a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggerConfig, directives: &str) -> Result<(), RedactionError> {
    let redactor = Arc::new(PiiRedactor::new(config.redaction.clone())?);
    let writer = RedactingMakeWriter::new(std::io::stdout, redactor, config.redaction_enabled);
    let filter = env_filter(config, directives);

    let result = if config.json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(writer)
                    .json(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| RedactionError::Init(e.to_string()))
}
