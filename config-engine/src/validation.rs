use crate::error::Result;

/// Post-deserialization checks for a typed configuration
pub trait Validate {
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::ValidationError`] describing the first
    /// invalid setting.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
