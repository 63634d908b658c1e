//! quizforge-core — Quiz generation pipeline, response parser, and traits.
//!
//! This crate defines the fundamental data model, the two-stage
//! generate/review pipeline, and the provider trait that the rest of
//! the quizforge system builds on.

pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod traits;
