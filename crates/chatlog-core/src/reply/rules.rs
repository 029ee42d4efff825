//! Keyword-rule reply policy.
//!
//! Ordered rules, first match wins. Keyword checks are case-insensitive
//! substring matches on the trimmed input, so "this" matches "hi".

/// Reply to empty or whitespace-only input.
pub const EMPTY_REPLY: &str = "I'm here! Ask me anything.";

pub const JOKE_REPLY: &str =
    "Here's one: Why do programmers prefer dark mode? Because light attracts bugs.";

pub const GREETING_REPLY: &str = "Hello! I'm your always-on AI. How can I help today?";

pub const HELP_REPLY: &str =
    "Tell me what you're trying to do, and I'll break it into clear steps.";

/// Prefix of the reply for longer inputs.
pub const ANSWER_PREFIX: &str = "Here's a quick, helpful answer based on what you asked: ";

pub const ANSWER_SUFFIX: &str =
    "\n\nI can also provide examples, step-by-step guides, or summaries if you like.";

/// Inputs shorter than this (in characters) are echoed back.
pub const SHORT_INPUT_CHARS: usize = 12;

/// Maximum number of input characters quoted in a long-input answer.
pub const QUOTE_MAX_CHARS: usize = 300;

/// Produce the rule-based reply for `text`.
pub fn generate(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return EMPTY_REPLY.to_string();
    }

    let lower = trimmed.to_lowercase();
    if lower.contains("joke") {
        return JOKE_REPLY.to_string();
    }
    if lower.contains("hello") || lower.contains("hi") {
        return GREETING_REPLY.to_string();
    }
    if lower.contains("help") {
        return HELP_REPLY.to_string();
    }

    if trimmed.chars().count() < SHORT_INPUT_CHARS {
        return format!("You said: '{trimmed}'. Tell me more so I can give a better answer.");
    }

    let quoted: String = trimmed.chars().take(QUOTE_MAX_CHARS).collect();
    format!("{ANSWER_PREFIX}{quoted}{ANSWER_SUFFIX}")
}
