use std::path::PathBuf;

/// Where configuration values come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File whose format is inferred from its extension
    File { path: PathBuf, required: bool },
    /// Environment variables under `PREFIX__`, nested keys split on `__`
    Env { prefix: String },
}

impl ConfigSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            required: true,
        }
    }

    pub fn optional_file(path: impl Into<PathBuf>) -> Self {
        Self::File {
            path: path.into(),
            required: false,
        }
    }

    pub fn env(prefix: impl Into<String>) -> Self {
        Self::Env {
            prefix: prefix.into(),
        }
    }
}
