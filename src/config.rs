use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the catalog and execution APIs.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash.
    pub api_url: String,
    /// Sent as a bearer token when present.
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                      |
    /// |-------------------------------|------------------------------|
    /// | `OTOYAI_API_URL`              | `http://localhost:8000/api`  |
    /// | `OTOYAI_API_KEY`              | unset                        |
    /// | `OTOYAI_REQUEST_TIMEOUT_SECS` | `120`                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("OTOYAI_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());

        let api_key = lookup("OTOYAI_API_KEY").filter(|s| !s.trim().is_empty());

        let request_timeout_secs = match lookup("OTOYAI_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                    name: "OTOYAI_REQUEST_TIMEOUT_SECS",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            request_timeout_secs,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
