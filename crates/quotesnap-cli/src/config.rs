use thiserror::Error;

/// Environment variable holding the Twelve Data credential.
pub const API_KEY_VAR: &str = "TWELVEDATA_API_KEY";

/// Startup configuration failures. Fatal, never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing {var} env var")]
    MissingApiKey { var: &'static str },
}

/// Process configuration, resolved once at startup and passed into the
/// client explicitly so tests can inject a fake credential.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    /// Read the credential from the process environment. An empty value is
    /// treated the same as an absent one.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingApiKey { var: API_KEY_VAR })?;

        Ok(Self { api_key })
    }
}
