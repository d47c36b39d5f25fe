use std::time::Duration;

/// Endpoint used when `ENHANCEMENT_ENDPOINT_URL` is not set.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000/process/complete";

/// Request timeout used when `ENHANCEMENT_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Enhancement client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Full URL of the enhancement endpoint.
    ///
    /// Kept as a raw string: it is validated on every submission so that a
    /// bad value surfaces as a validation error before any I/O.
    pub endpoint_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl ClientConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                                  |
    /// |----------------------------|------------------------------------------|
    /// | `ENHANCEMENT_ENDPOINT_URL` | `http://localhost:8000/process/complete` |
    /// | `ENHANCEMENT_TIMEOUT_SECS` | `120` (`0` disables the timeout)         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint_url = lookup("ENHANCEMENT_ENDPOINT_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT_URL.into());

        let timeout_secs: u64 = match lookup("ENHANCEMENT_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "ENHANCEMENT_TIMEOUT_SECS",
                expected: "u64",
                value: raw,
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            endpoint_url,
            timeout,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT_URL)
    }
}
