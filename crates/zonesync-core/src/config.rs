//! Configuration types for zonesync
//!
//! This module defines all configuration structures used throughout the workspace.

use serde::{Deserialize, Serialize};

/// DNS provider configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// netcup CCP DNS API
    Netcup {
        /// Customer number
        customer_number: String,
        /// API key
        api_key: String,
        /// API password
        api_password: String,
        /// Endpoint override (defaults to the public JSON endpoint)
        #[serde(default)]
        endpoint: Option<String>,
    },

    /// Custom provider
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl ProviderConfig {
    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            ProviderConfig::Netcup {
                customer_number,
                api_key,
                api_password,
                endpoint,
            } => {
                if customer_number.is_empty() {
                    return Err(crate::Error::config("netcup customer number cannot be empty"));
                }
                if api_key.is_empty() {
                    return Err(crate::Error::config("netcup API key cannot be empty"));
                }
                if api_password.is_empty() {
                    return Err(crate::Error::config("netcup API password cannot be empty"));
                }
                if let Some(url) = endpoint
                    && !url.starts_with("https://")
                    && !url.starts_with("http://")
                {
                    return Err(crate::Error::config(format!(
                        "netcup endpoint must be an HTTP or HTTPS URL, got: {}",
                        url
                    )));
                }
                Ok(())
            }
            ProviderConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config(
                        "Custom provider factory cannot be empty",
                    ));
                }
                if config.is_null() {
                    return Err(crate::Error::config(
                        "Custom provider config cannot be null",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the provider type name
    pub fn type_name(&self) -> &str {
        match self {
            ProviderConfig::Netcup { .. } => "netcup",
            ProviderConfig::Custom { factory, .. } => factory,
        }
    }
}

// Credentials never reach logs
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Netcup {
                customer_number,
                endpoint,
                ..
            } => f
                .debug_struct("Netcup")
                .field("customer_number", customer_number)
                .field("api_key", &"<REDACTED>")
                .field("api_password", &"<REDACTED>")
                .field("endpoint", endpoint)
                .finish(),
            ProviderConfig::Custom { factory, .. } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", &"<REDACTED>")
                .finish(),
        }
    }
}

/// Client behaviour shared by all providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Timeout for a single provider request (in seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on the best-effort logout (in seconds)
    ///
    /// Logout runs on every exit path, including cancellation, and must
    /// never hold the caller up for long.
    #[serde(default = "default_logout_timeout_secs")]
    pub logout_timeout_secs: u64,

    /// Compute and log batches without submitting them
    #[serde(default)]
    pub dry_run: bool,
}

impl ClientConfig {
    /// Validate the client configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.request_timeout_secs == 0 {
            return Err(crate::Error::config("request timeout must be > 0"));
        }
        if self.logout_timeout_secs == 0 {
            return Err(crate::Error::config("logout timeout must be > 0"));
        }
        Ok(())
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            logout_timeout_secs: default_logout_timeout_secs(),
            dry_run: false,
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_logout_timeout_secs() -> u64 {
    5
}
