//! Completion provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`CompletionProvider`]
//! trait from `chatlog-core`, plus a factory ([`create_provider`]) that builds
//! the configured provider when a credential is available.
//!
//! [`CompletionProvider`]: chatlog_core::llm::provider::CompletionProvider

pub mod openai_compat;

use secrecy::SecretString;

use chatlog_core::llm::box_provider::BoxCompletionProvider;
use chatlog_core::llm::provider::CompletionProvider;
use chatlog_types::config::ProviderSettings;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create the configured provider, or `None` when no API key is available.
///
/// An explicit `base_url` wins. Otherwise well-known names ("openai",
/// "gemini", "mistral") select their endpoint and unknown names fall back to
/// the OpenAI endpoint.
pub fn create_provider(
    settings: &ProviderSettings,
    api_key: Option<SecretString>,
) -> Option<BoxCompletionProvider> {
    let Some(key) = api_key else {
        tracing::info!(
            env = %settings.api_key_env,
            "no provider API key configured, replies use local rules"
        );
        return None;
    };

    let provider = match settings.base_url.as_deref() {
        Some(base_url) => OpenAiCompatibleProvider::new(OpenAiCompatConfig {
            provider_name: settings.name.clone(),
            base_url: base_url.to_string(),
            api_key: key,
            model: settings.model.clone(),
        }),
        None => match settings.name.as_str() {
            "openai" => OpenAiCompatibleProvider::openai(key, &settings.model),
            "gemini" => OpenAiCompatibleProvider::gemini(key, &settings.model),
            "mistral" => OpenAiCompatibleProvider::mistral(key, &settings.model),
            other => {
                tracing::warn!(provider = other, "unknown provider name, using OpenAI endpoint");
                OpenAiCompatibleProvider::openai(key, &settings.model)
            }
        },
    };

    tracing::info!(
        provider = %provider.name(),
        model = %settings.model,
        base_url = %provider.base_url(),
        "external completion provider enabled"
    );

    Some(BoxCompletionProvider::new(provider))
}
