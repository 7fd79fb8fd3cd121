//! Provider configuration
//!
//! Resolution order for each setting:
//! 1. the provider block in the configuration
//! 2. the environment (`BPKIO_ENDPOINT`, `BPKIO_API_KEY`)
//! 3. the built-in default (endpoint only)

pub mod error;

pub use error::*;

use bpkio_client::{ClientConfig, DEFAULT_ENDPOINT};
use bpkio_plugin::{Diagnostic, Value};
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const ENDPOINT_ENV: &str = "BPKIO_ENDPOINT";
pub const API_KEY_ENV: &str = "BPKIO_API_KEY";

/// Provider block as written by the user
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub endpoint: Value<String>,
    pub api_key: Value<String>,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.clone().map(|_| "<redacted>"))
            .finish()
    }
}

/// Fully resolved connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl From<ResolvedConfig> for ClientConfig {
    fn from(config: ResolvedConfig) -> Self {
        ClientConfig {
            endpoint: config.endpoint,
            api_key: config.api_key,
        }
    }
}

impl From<ConfigError> for Diagnostic {
    fn from(error: ConfigError) -> Self {
        Diagnostic::error(error.summary(), error.to_string()).at(error.attribute())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Resolves the provider settings, reporting every problem at once
pub fn resolve(settings: &ProviderSettings) -> Result<ResolvedConfig> {
    let mut errors = Vec::new();

    if settings.endpoint.is_unknown() {
        errors.push(ConfigError::UnknownValue {
            attribute: "endpoint",
            label: "Endpoint",
            env: ENDPOINT_ENV,
        });
    }
    if settings.api_key.is_unknown() {
        errors.push(ConfigError::UnknownValue {
            attribute: "api_key",
            label: "Key",
            env: API_KEY_ENV,
        });
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let endpoint = settings
        .endpoint
        .optional()
        .cloned()
        .or_else(|| env_var(ENDPOINT_ENV))
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let api_key = settings
        .api_key
        .optional()
        .cloned()
        .or_else(|| env_var(API_KEY_ENV))
        .unwrap_or_default();
    debug!(%endpoint, "resolved bpkio endpoint");

    if api_key.is_empty() {
        errors.push(ConfigError::MissingApiKey);
    }
    if let Err(message) = check_endpoint(&endpoint) {
        errors.push(ConfigError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            message,
        });
    }

    if errors.is_empty() {
        Ok(ResolvedConfig { endpoint, api_key })
    } else {
        Err(errors)
    }
}

fn check_endpoint(endpoint: &str) -> std::result::Result<(), String> {
    let url = Url::parse(endpoint).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme {other:?}")),
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err("missing host".to_string());
    }
    Ok(())
}
