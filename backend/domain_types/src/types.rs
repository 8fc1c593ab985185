use common_utils::{custom_serde, CustomResult};
use error_stack::{report, Report};
use hyperswitch_masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::errors::ConnectorError;

/// Store credentials and options the host keeps for the gateway.
///
/// Loaded once and threaded immutably into every operation.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GatewaySettings {
    pub store_id: Secret<String>,
    pub store_password: Secret<String>,
    #[serde(default)]
    pub store_prefix: String,
    #[serde(default)]
    pub dev_mode: bool,
}

impl GatewaySettings {
    /// Setting names the host must store encrypted
    pub const ENCRYPTABLE_FIELDS: [&'static str; 2] = ["store_id", "store_password"];

    pub fn encryptable_fields() -> Vec<&'static str> {
        Self::ENCRYPTABLE_FIELDS.to_vec()
    }

    /// Fails with `ConfigError` when either credential is blank.
    pub fn ensure_credentials(&self) -> CustomResult<(), ConnectorError> {
        if self.store_id.peek().trim().is_empty() {
            return Err(report!(ConnectorError::ConfigError {
                field_name: "store_id"
            }));
        }
        if self.store_password.peek().trim().is_empty() {
            return Err(report!(ConnectorError::ConfigError {
                field_name: "store_password"
            }));
        }
        Ok(())
    }
}

/// Raw settings as submitted by the host's settings form.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SettingsMeta {
    #[serde(default)]
    pub store_id: Option<Secret<String>>,
    #[serde(default)]
    pub store_password: Option<Secret<String>>,
    #[serde(default)]
    pub store_prefix: Option<String>,
    /// Checkbox value, `"true"`/`"false"` or a boolean
    #[serde(default, with = "custom_serde::optional_string_or_number")]
    pub dev_mode: Option<String>,
}

/// A single rejected settings field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SettingsValidationError {
    pub field_name: &'static str,
    pub message: &'static str,
}

impl SettingsValidationError {
    const STORE_ID: Self = Self {
        field_name: "store_id",
        message: "You must enter a valid Store ID.",
    };
    const STORE_PASSWORD: Self = Self {
        field_name: "store_password",
        message: "You must enter a valid Store Password.",
    };
}

impl SettingsMeta {
    /// Validates the submitted settings, collecting every rejected field.
    ///
    /// `dev_mode` defaults to off when the checkbox was not submitted.
    pub fn validate(self) -> Result<GatewaySettings, Report<SettingsValidationError>> {
        let store_id = self.store_id.filter(|value| !value.peek().trim().is_empty());
        let store_password = self
            .store_password
            .filter(|value| !value.peek().trim().is_empty());

        match (store_id, store_password) {
            (Some(store_id), Some(store_password)) => Ok(GatewaySettings {
                store_id,
                store_password,
                store_prefix: self.store_prefix.unwrap_or_default(),
                dev_mode: matches!(self.dev_mode.as_deref(), Some("true" | "1")),
            }),
            (None, store_password) => {
                let mut errors = report!(SettingsValidationError::STORE_ID);
                if store_password.is_none() {
                    errors.extend_one(report!(SettingsValidationError::STORE_PASSWORD));
                }
                Err(errors)
            }
            (Some(_), None) => Err(report!(SettingsValidationError::STORE_PASSWORD)),
        }
    }
}

#[derive(Clone, Deserialize, Serialize, Debug, Default, PartialEq)]
pub struct ConnectorParams {
    /// production base url
    #[serde(default)]
    pub base_url: String,
    /// base url used while `dev_mode` is on
    #[serde(default)]
    pub sandbox_base_url: String,
}

impl ConnectorParams {
    /// Picks the base url for the given mode, always ending with `/`
    pub fn base_url_for(&self, dev_mode: bool) -> String {
        let base_url = if dev_mode {
            &self.sandbox_base_url
        } else {
            &self.base_url
        };
        if base_url.ends_with('/') {
            base_url.clone()
        } else {
            format!("{base_url}/")
        }
    }
}

#[derive(Clone, serde::Deserialize, Debug, Default)]
pub struct Connectors {
    pub shurjopay: ConnectorParams,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    pub bypass_proxy_urls: Vec<String>,
}

impl Proxy {
    /// Key of the cached client to use, `None` selects the direct client
    pub fn cache_key(&self, should_bypass_proxy: bool) -> Option<Self> {
        if should_bypass_proxy || !self.has_proxy() {
            None
        } else {
            Some(self.clone())
        }
    }

    pub fn has_proxy(&self) -> bool {
        self.http_url.is_some() || self.https_url.is_some()
    }

    pub fn should_bypass(&self, url: &str) -> bool {
        self.bypass_proxy_urls
            .iter()
            .any(|bypass| url.starts_with(bypass.as_str()))
    }
}

/// Timeouts applied to every outbound call
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpClientConfig {
    pub total_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            total_timeout_secs: 45,
            connect_timeout_secs: 10,
        }
    }
}

/// Where the host expects the post-payment callback
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HostConfig {
    #[serde(default)]
    pub gw_callback_url: String,
    #[serde(default)]
    pub company_id: String,
}

/// Immutable inputs shared by every gateway operation
#[derive(Debug, Clone)]
pub struct GatewayContext {
    pub settings: GatewaySettings,
    pub connectors: Connectors,
    pub host: HostConfig,
    pub proxy: Proxy,
    pub http_client: HttpClientConfig,
}
