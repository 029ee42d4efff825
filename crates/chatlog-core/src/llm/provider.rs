//! CompletionProvider trait definition.
//!
//! This is the abstraction every external text-generation backend implements.
//! Chatlog only needs single-shot completions, so there is no streaming or
//! token counting here.

use chatlog_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for external text-generation backends (OpenAI, Gemini, Mistral, ...).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in chatlog-infra (e.g., `OpenAiCompatibleProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai", "mistral").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
