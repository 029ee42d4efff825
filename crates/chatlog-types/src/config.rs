//! Global configuration types for Chatlog.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! HTTP listener, the optional external generation provider, and telemetry.

use serde::{Deserialize, Serialize};

/// Environment variable consulted for the provider credential by default.
pub const DEFAULT_API_KEY_ENV: &str = "CHATLOG_PROVIDER_API_KEY";

/// Top-level configuration for the Chatlog service.
///
/// Loaded from `~/.chatlog/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// External generation provider settings.
///
/// The provider is only used when the environment variable named by
/// `api_key_env` holds a non-empty value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Well-known provider name ("openai", "gemini", "mistral") or any label
    /// when `base_url` is set.
    #[serde(default = "default_provider_name")]
    pub name: String,
    /// Override the provider's default base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_provider_name() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            base_url: None,
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Tracing export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Bridge tracing spans to OpenTelemetry with a stdout exporter.
    #[serde(default)]
    pub otel_stdout: bool,
}
