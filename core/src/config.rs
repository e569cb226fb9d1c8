//! Client configuration loaded from the environment.

use std::env;

use crate::error::ConfigurationError;

/// Environment variable holding the API base URL.
pub const API_BASE_URL: &str = "API_BASE_URL";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
}

impl Config {
    /// Load configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let api_base_url = lookup(API_BASE_URL).ok_or_else(|| ConfigurationError {
            base_url: String::new(),
            reason: format!("{API_BASE_URL} is not set"),
        })?;
        Ok(Self { api_base_url })
    }
}
