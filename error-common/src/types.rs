use thiserror::Error;

/// Top-level error for binaries and glue code
#[derive(Error, Debug)]
pub enum AppError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server runtime errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Configuration loading or validation errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Logging subsystem errors
    #[error("Logging error: {0}")]
    LoggingError(String),

    /// Billing domain errors surfaced to the binary
    #[error("Billing error: {0}")]
    BillingError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Short machine-readable category, used as a structured log field
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::NetworkError(_) => "network_error",
            AppError::ServerError(_) => "server_error",
            AppError::ConfigError(_) => "config_error",
            AppError::LoggingError(_) => "logging_error",
            AppError::BillingError(_) => "billing_error",
            AppError::Other(_) => "internal_error",
        }
    }
}

/// Result type alias for application-level operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Log an error with its category and the context it occurred in
pub fn log_error(context: &str, error: &AppError) {
    tracing::error!(
        context = context,
        error_type = error.error_type(),
        error = %error,
        "Application error occurred"
    );
}
