//! OpenTelemetry GenAI Semantic Convention attribute names.
//!
//! Used as field names on the span wrapping each external completion call.
//! Span naming convention: `"{operation} {model}"` (e.g., `"chat gpt-4o-mini"`).

/// The name of the operation being performed (e.g., "chat").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "openai").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

/// The model ID requested.
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The sampling temperature for the request.
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";

/// The number of input tokens consumed.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// The number of output tokens generated.
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// The unique response ID from the provider.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

/// Standard chat completion operation.
pub const OP_CHAT: &str = "chat";

/// Build a span name following the `"{operation} {model}"` convention.
pub fn span_name(operation: &str, model: &str) -> String {
    format!("{operation} {model}")
}
