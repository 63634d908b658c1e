//! quizforge-providers — LLM completion backends.
//!
//! Implements the `CompletionProvider` trait for OpenAI, Anthropic, and
//! Ollama, allowing quizforge to generate quizzes from multiple backends.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod mock;
pub mod ollama;
pub mod openai;

pub use config::{create_provider, load_config, ProviderConfig, QuizforgeConfig};
pub use error::ProviderError;
