//! Commonly used constants

/// Prefix for environment variables overriding the configuration file
pub const ENV_PREFIX: &str = "SHURJOPAY";

/// Environment variable selecting the run environment
pub const RUN_ENV: &str = "RUN_ENV";

/// Header carrying the request id, set and propagated by the HTTP layer
pub const X_REQUEST_ID: &str = "x-request-id";

/// Fallback customer ip sent to the processor when the host does not forward one
pub const DEFAULT_CLIENT_IP: &str = "127.0.0.1";

/// Content type used for every outbound JSON body
pub const APPLICATION_JSON: &str = "application/json";

/// Environment the gateway is running in, selects the config file
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    /// Reads the environment from `RUN_ENV`, falling back to development
    pub fn current_env() -> Self {
        std::env::var(RUN_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub const fn config_path(self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}
