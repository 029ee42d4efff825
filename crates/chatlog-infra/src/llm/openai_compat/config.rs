//! Per-provider defaults for OpenAI-compatible providers.
//!
//! Each provider that speaks the OpenAI chat completions protocol gets a factory
//! function returning an [`OpenAiCompatConfig`] with the correct base URL.

use secrecy::SecretString;

/// Configuration for an OpenAI-compatible completion provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai", "gemini").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model used when a request leaves `model` empty.
    pub model: String,
}

/// OpenAI. Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key,
        model: model.into(),
    }
}

/// Google Gemini (OpenAI-compatible beta endpoint).
///
/// Base URL: `https://generativelanguage.googleapis.com/v1beta/openai`
pub fn gemini_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "gemini".into(),
        base_url: "https://generativelanguage.googleapis.com/v1beta/openai".into(),
        api_key,
        model: model.into(),
    }
}

/// Mistral AI. Base URL: `https://api.mistral.ai/v1`
pub fn mistral_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "mistral".into(),
        base_url: "https://api.mistral.ai/v1".into(),
        api_key,
        model: model.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn key(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults(key("sk-test"), "gpt-4o-mini");
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_key.expose_secret(), "sk-test");
    }

    #[test]
    fn test_gemini_defaults() {
        let config = gemini_defaults(key("g"), "gemini-2.5-flash");
        assert_eq!(config.provider_name, "gemini");
        assert!(config.base_url.contains("generativelanguage.googleapis.com"));
    }

    #[test]
    fn test_mistral_defaults() {
        let config = mistral_defaults(key("m"), "mistral-small-latest");
        assert_eq!(config.provider_name, "mistral");
        assert_eq!(config.base_url, "https://api.mistral.ai/v1");
    }
}
