use base64::{engine::general_purpose, Engine as _};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";
// Brazilian landline and mobile numbers: (11) 3333-4444, (11) 99999-9999
const PHONE_PATTERN: &str = r"\(\d{2}\)\s?\d{4,5}-\d{4}\b";
const CPF_PATTERN: &str = r"\b\d{3}\.\d{3}\.\d{3}-\d{2}\b";
const ZIP_CODE_PATTERN: &str = r"\b\d{5}-\d{3}\b";

#[derive(Error, Debug)]
pub enum RedactionError {
    #[error("invalid redaction pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Organization-specific pattern with its replacement text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomPattern {
    pub pattern: String,
    #[serde(default = "default_replacement")]
    pub replacement: String,
}

fn default_replacement() -> String {
    "[REDACTED]".to_string()
}

/// PII redaction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    pub redact_emails: bool,
    pub redact_phones: bool,
    pub redact_cpf: bool,
    pub redact_zip_codes: bool,
    pub hash_for_correlation: bool,
    pub custom_patterns: Vec<CustomPattern>,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            redact_emails: true,
            redact_phones: true,
            redact_cpf: true,
            redact_zip_codes: true,
            hash_for_correlation: true,
            custom_patterns: Vec::new(),
        }
    }
}

/// PII redactor for log messages
#[derive(Debug)]
pub struct PiiRedactor {
    config: RedactionConfig,
    email: Regex,
    phone: Regex,
    cpf: Regex,
    zip_code: Regex,
    custom: Vec<(Regex, String)>,
}

fn compile(pattern: &str) -> Result<Regex, RedactionError> {
    Regex::new(pattern).map_err(|source| RedactionError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

impl PiiRedactor {
    /// Build a redactor, compiling the built-in and custom patterns.
    ///
    /// # Errors
    ///
    /// Returns [`RedactionError::InvalidPattern`] when a custom pattern is not
    /// a valid regular expression.
    pub fn new(config: RedactionConfig) -> Result<Self, RedactionError> {
        let custom = config
            .custom_patterns
            .iter()
            .map(|p| Ok((compile(&p.pattern)?, p.replacement.clone())))
            .collect::<Result<Vec<_>, RedactionError>>()?;

        Ok(Self {
            email: compile(EMAIL_PATTERN)?,
            phone: compile(PHONE_PATTERN)?,
            cpf: compile(CPF_PATTERN)?,
            zip_code: compile(ZIP_CODE_PATTERN)?,
            custom,
            config,
        })
    }

    pub fn redact(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.config.redact_emails {
            result = self.redact_emails(&result);
        }

        if self.config.redact_phones {
            result = self.mask(&self.phone, &result, "PHONE", "(**) *****-****");
        }

        if self.config.redact_cpf {
            result = self.mask(&self.cpf, &result, "CPF", "***.***.***-**");
        }

        if self.config.redact_zip_codes {
            result = self.mask(&self.zip_code, &result, "CEP", "*****-***");
        }

        for (pattern, replacement) in &self.custom {
            result = pattern.replace_all(&result, replacement.as_str()).to_string();
        }

        result
    }

    fn redact_emails(&self, text: &str) -> String {
        self.email
            .replace_all(text, |caps: &regex::Captures| {
                let email = caps.get(0).map_or("", |m| m.as_str());
                if self.config.hash_for_correlation {
                    return format!("EMAIL[{}]", hash_value(email));
                }
                match email.split_once('@') {
                    Some((local, domain)) => format!(
                        "{}***@{}***",
                        local.chars().next().unwrap_or('*'),
                        domain.chars().next().unwrap_or('*')
                    ),
                    None => "***@***".to_string(),
                }
            })
            .to_string()
    }

    fn mask(&self, pattern: &Regex, text: &str, tag: &str, fixed: &str) -> String {
        pattern
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    let matched = caps.get(0).map_or("", |m| m.as_str());
                    format!("{tag}[{}]", hash_value(matched))
                } else {
                    fixed.to_string()
                }
            })
            .to_string()
    }
}

fn hash_value(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    // first 8 bytes keep the tag short
    let prefix: Vec<u8> = digest.iter().take(8).copied().collect();
    general_purpose::STANDARD.encode(prefix)
}
