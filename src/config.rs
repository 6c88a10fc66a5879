use crate::error::ConfigError;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Where the decision service lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    /// Transport timeout. `None` leaves the HTTP client's default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: None,
        }
    }

    /// Reads `PAYNOW_BASE_URL`, `PAYNOW_API_KEY` and `PAYNOW_TIMEOUT_SECS`,
    /// after layering any `.env` files found nearby.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv_layers();
        Ok(Self {
            base_url: read_optional_string("PAYNOW_BASE_URL", DEFAULT_BASE_URL),
            api_key: read_var("PAYNOW_API_KEY")?,
            timeout: read_optional_u64("PAYNOW_TIMEOUT_SECS")?.map(Duration::from_secs),
        })
    }
}

fn read_var(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn read_optional_u64(key: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(key) {
        Ok(v) => v.trim().parse::<u64>().map(Some).map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(None),
    }
}

fn read_optional_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn load_dotenv_layers() {
    for path in [".env", "../.env"] {
        let _ = dotenvy::from_path(path);
    }
}
