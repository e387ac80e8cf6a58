use anyhow::Result;
use serde::Deserialize;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://otter.ai/forward/api/v1/";

/// Settings loaded from an optional file plus `OTTER_*` environment variables
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ClientConfig,
    pub credentials: Option<Credentials>,
}

/// Transport settings for [`OtterClient`](crate::OtterClient)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Request timeout; unset means the transport default
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("otter-client/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load from `path` (any format the config crate knows, extension optional)
    /// if it exists, then apply `OTTER_` environment overrides such as
    /// `OTTER_CREDENTIALS__PASSWORD`.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("OTTER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
