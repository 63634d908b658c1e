//! Core data model types for quizforge.
//!
//! These are the fundamental types that the entire quizforge system uses
//! to represent quiz requests, format exemplars, and pipeline artifacts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single quiz-generation request.
///
/// Constructed per invocation, consumed once, discarded. Bounds on
/// `question_count` (3–50) and the subject/tone lengths (20 chars) are
/// enforced by the caller, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    /// Already-extracted plain text the quiz is drawn from.
    pub source_text: String,
    /// How many multiple-choice questions to ask for.
    pub question_count: u32,
    /// Audience subject (e.g. "Science").
    pub subject: String,
    /// Complexity/tone of the questions (e.g. "Simple").
    pub tone: String,
    /// Formatting exemplar interpolated into the generation prompt.
    pub format_template: FormatTemplate,
}

/// One multiple-choice question, as it appears in the format exemplar
/// and (hopefully) in the model's quiz output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question number as a string, matching the exemplar shape.
    #[serde(default)]
    pub no: String,
    /// The question text.
    pub mcq: String,
    /// Option letter → option text.
    pub options: BTreeMap<String, String>,
    /// The correct answer, verbatim.
    pub correct: String,
}

/// The format exemplar: a mapping from question index ("1"..N) to a
/// sample question shape.
///
/// Injected into the generation prompt purely to steer the model's output
/// shape; never validated against what the model actually returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatTemplate(BTreeMap<String, QuizQuestion>);

impl FormatTemplate {
    /// Decode a template from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Serialize the template for interpolation into the prompt.
    pub fn to_prompt_json(&self) -> String {
        // BTreeMap keys give a stable order; pretty-printing keeps the
        // exemplar readable for the model.
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }

    /// The exemplar entries, keyed by question index.
    pub fn entries(&self) -> &BTreeMap<String, QuizQuestion> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FormatTemplate {
    /// The built-in three-entry exemplar used when no template file is given.
    fn default() -> Self {
        let mut map = BTreeMap::new();
        for i in 1..=3u32 {
            let mut options = BTreeMap::new();
            for letter in ["a", "b", "c", "d"] {
                options.insert(letter.to_string(), "choice here".to_string());
            }
            map.insert(
                i.to_string(),
                QuizQuestion {
                    no: i.to_string(),
                    mcq: "multiple choice question".to_string(),
                    options,
                    correct: "correct answer".to_string(),
                },
            );
        }
        Self(map)
    }
}

impl From<BTreeMap<String, QuizQuestion>> for FormatTemplate {
    fn from(map: BTreeMap<String, QuizQuestion>) -> Self {
        Self(map)
    }
}

/// Raw textual output of the generation stage.
///
/// Expected, but not guaranteed, to parse as a JSON mapping matching the
/// format exemplar's shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizArtifact {
    pub text: String,
}

/// Free-text critique produced by the review stage.
///
/// Capped at roughly 50 words by prompt instruction only; may also contain
/// corrected questions, which are treated as opaque text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewArtifact {
    pub text: String,
}

/// One question flattened for tabular display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRow {
    /// The question text.
    pub mcq: String,
    /// Options flattened into one "a: .. | b: .." display string.
    pub options: String,
    /// The correct answer, verbatim.
    pub correct: String,
}

/// Token usage reported by the completion service.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Sum usage across pipeline stages.
    pub fn combine(self, other: TokenUsage) -> TokenUsage {
        TokenUsage {
            prompt_tokens: self.prompt_tokens + other.prompt_tokens,
            completion_tokens: self.completion_tokens + other.completion_tokens,
            total_tokens: self.total_tokens + other.total_tokens,
        }
    }
}

/// The combined result of a pipeline run: both artifacts plus the summed
/// token usage of the two stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOutput {
    pub quiz: QuizArtifact,
    pub review: ReviewArtifact,
    pub usage: TokenUsage,
}
