use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::providers::ConfigSource;
use crate::validation::Validate;

/// Builder that layers sources and deserializes them into a typed config
#[derive(Debug, Default, Clone)]
pub struct ConfigEngine {
    sources: Vec<ConfigSource>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Merge all sources and deserialize into `T`, then run its validation.
    ///
    /// # Errors
    ///
    /// Fails when a required file is missing, a source cannot be parsed, the
    /// merged values do not fit `T`, or `T::validate` rejects them.
    pub fn load<T>(&self) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let mut builder = Config::builder();

        for source in &self.sources {
            match source {
                ConfigSource::File { path, required } => {
                    if *required && !path.exists() {
                        return Err(ConfigError::SourceNotFound(path.display().to_string()));
                    }
                    debug!(path = %path.display(), required, "Adding configuration file");
                    builder = builder.add_source(File::from(path.as_path()).required(*required));
                }
                ConfigSource::Env { prefix } => {
                    debug!(prefix = %prefix, "Adding environment configuration");
                    builder = builder.add_source(
                        Environment::with_prefix(prefix)
                            .separator("__")
                            .try_parsing(true),
                    );
                }
            }
        }

        let typed: T = builder.build()?.try_deserialize()?;
        typed.validate()?;
        Ok(typed)
    }
}
