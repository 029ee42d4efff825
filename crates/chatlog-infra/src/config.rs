//! Global configuration loader for Chatlog.
//!
//! Reads `config.toml` from the data directory (`~/.chatlog/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use chatlog_types::config::{GlobalConfig, ProviderSettings};
use secrecy::SecretString;

/// Resolve the data directory.
///
/// Uses `CHATLOG_DATA_DIR` when set, otherwise `~/.chatlog`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHATLOG_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatlog");
    }

    // Last resort: current directory
    PathBuf::from(".chatlog")
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`GlobalConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Read the provider credential from the environment variable named by
/// `settings.api_key_env`. Unset, non-Unicode, and blank values all yield `None`.
pub fn resolve_api_key(settings: &ProviderSettings) -> Option<SecretString> {
    non_blank_secret(std::env::var(&settings.api_key_env).ok())
}

fn non_blank_secret(value: Option<String>) -> Option<SecretString> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}
