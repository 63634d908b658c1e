//! Quiz response parser.
//!
//! Best-effort conversion of a stage-1 artifact into display rows. Decoding
//! is strict: either the whole artifact conforms or a typed error is
//! returned. No partial recovery of well-formed entries is attempted, so
//! callers can distinguish "zero questions" from "malformed output".

use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::{QuizArtifact, QuizQuestion, QuizRow};
use crate::traits::extract_json_from_markdown;

/// Separator between flattened options in a `QuizRow`.
pub const OPTION_SEPARATOR: &str = " | ";

/// Why a quiz artifact could not be parsed.
#[derive(Debug, Error)]
pub enum QuizParseError {
    /// The artifact text is not valid JSON of the expected shape.
    #[error("quiz output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The top-level mapping has a key that is not a question index.
    #[error("quiz output has a non-numeric question index: {0:?}")]
    NonNumericIndex(String),
}

/// Parse a quiz artifact into display rows, ordered by ascending question
/// index.
///
/// Markdown code fences around the JSON are stripped first, since models
/// routinely add them despite instructions. A valid but empty mapping
/// yields `Ok(vec![])`.
///
/// Pure function: no state, identical input yields identical output, and
/// arbitrary non-JSON input returns an error rather than panicking.
pub fn parse_quiz(artifact: &QuizArtifact) -> Result<Vec<QuizRow>, QuizParseError> {
    let json = extract_json_from_markdown(&artifact.text);
    let map: BTreeMap<String, QuizQuestion> = serde_json::from_str(&json)?;

    // BTreeMap orders keys lexicographically ("10" before "2"); sort
    // numerically instead.
    let mut entries = map
        .into_iter()
        .map(|(key, question)| match key.trim().parse::<u32>() {
            Ok(index) => Ok((index, question)),
            Err(_) => Err(QuizParseError::NonNumericIndex(key)),
        })
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|(index, _)| *index);

    Ok(entries
        .into_iter()
        .map(|(_, question)| QuizRow {
            mcq: question.mcq,
            options: flatten_options(&question.options),
            correct: question.correct,
        })
        .collect())
}

/// Flatten an options mapping into a single "a: .. | b: .." display string.
fn flatten_options(options: &BTreeMap<String, String>) -> String {
    options
        .iter()
        .map(|(label, text)| format!("{label}: {text}"))
        .collect::<Vec<_>>()
        .join(OPTION_SEPARATOR)
}
