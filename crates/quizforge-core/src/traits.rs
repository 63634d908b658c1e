//! Core trait definition for completion providers.
//!
//! This async trait is implemented by the `quizforge-providers` crate for
//! each supported LLM backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::TokenUsage;

// ---------------------------------------------------------------------------
// Completion provider trait
// ---------------------------------------------------------------------------

/// Trait for LLM backends that turn a prompt into a text completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g. "openai").
    fn name(&self) -> &str;

    /// Produce a completion for a prompt.
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse>;

    /// List available models for this provider.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request for a single text completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (e.g. "gpt-3.5-turbo").
    pub model: String,
    /// The main prompt.
    pub prompt: String,
    /// Optional system prompt override.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Stop sequences.
    #[serde(default)]
    pub stop_sequences: Vec<String>,
}

/// Response from a completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The raw completion text.
    pub content: String,
    /// Model that actually produced the response.
    pub model: String,
    /// Token usage.
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Provider name.
    pub provider: String,
    /// Maximum context window size in tokens.
    pub max_context: u32,
}

// ---------------------------------------------------------------------------
// Default system prompt
// ---------------------------------------------------------------------------

/// Default system prompt for quiz providers.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert quiz author. Follow the requested output format exactly. Do not add prose or commentary beyond what the prompt asks for.";

// ---------------------------------------------------------------------------
// Markdown fence extraction
// ---------------------------------------------------------------------------

/// Extract JSON from markdown-formatted LLM responses.
///
/// Models frequently wrap their quiz JSON in code fences. Handles:
/// - Single or multiple ```json``` blocks (concatenated)
/// - Generic ``` blocks (if no json-specific blocks found)
/// - Raw text with no fences (returned as-is)
pub fn extract_json_from_markdown(response: &str) -> String {
    let mut json_blocks = Vec::new();
    let mut generic_blocks = Vec::new();
    let mut in_block = false;
    let mut is_json_block = false;
    let mut is_generic_block = false;
    let mut current_block = String::new();

    for line in response.lines() {
        let trimmed = line.trim();

        if !in_block && trimmed.starts_with("```") {
            in_block = true;
            let lang = trimmed.trim_start_matches('`').trim().to_lowercase();
            is_json_block = lang == "json";
            is_generic_block = lang.is_empty();
            current_block.clear();
            continue;
        }

        if in_block && trimmed == "```" {
            in_block = false;
            if is_json_block {
                json_blocks.push(current_block.clone());
            } else if is_generic_block {
                generic_blocks.push(current_block.clone());
            }
            current_block.clear();
            continue;
        }

        if in_block {
            if !current_block.is_empty() {
                current_block.push('\n');
            }
            current_block.push_str(line);
        }
    }

    // Handle truncated (unclosed) fences — treat accumulated content as a block
    if in_block && !current_block.is_empty() {
        if is_json_block {
            json_blocks.push(current_block);
        } else if is_generic_block {
            generic_blocks.push(current_block);
        }
    }

    if !json_blocks.is_empty() {
        return json_blocks.join("\n\n");
    }

    if !generic_blocks.is_empty() {
        return generic_blocks.join("\n\n");
    }

    // No fences found — return raw response
    response.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_single_json_block() {
        let input = "Here is the quiz:\n\n```json\n{\"1\": {\"mcq\": \"q\"}}\n```\n\nDone!";
        let json = extract_json_from_markdown(input);
        assert_eq!(json, "{\"1\": {\"mcq\": \"q\"}}");
    }

    #[test]
    fn extract_no_fences_returns_raw() {
        let input = "{\"1\": {\"mcq\": \"q\"}}";
        assert_eq!(extract_json_from_markdown(input), input);
    }

    #[test]
    fn extract_generic_block_fallback() {
        let input = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_from_markdown(input), "{\"a\": 1}");
    }

    #[test]
    fn extract_prefers_json_over_generic() {
        let input = "```\nnot it\n```\n\n```json\n{\"a\": 1}\n```\n";
        assert_eq!(extract_json_from_markdown(input), "{\"a\": 1}");
    }

    #[test]
    fn extract_truncated_unclosed_block() {
        let input = "Quiz:\n\n```json\n{\"1\": {\"mcq\": \"q\"}}";
        let json = extract_json_from_markdown(input);
        assert!(
            json.contains("mcq"),
            "truncated block should be captured, got: {json}"
        );
    }

    #[test]
    fn extract_ignores_other_languages() {
        let input = "```python\nprint(\"hi\")\n```\n\n```json\n{\"a\": 1}\n```\n";
        assert_eq!(extract_json_from_markdown(input), "{\"a\": 1}");
    }

    #[test]
    fn extract_multiline_json() {
        let input = "```json\n{\n  \"1\": {\n    \"mcq\": \"q\"\n  }\n}\n```";
        let json = extract_json_from_markdown(input);
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
    }
}
