//! Pipeline error types.
//!
//! A pipeline run fails as a single error event naming the stage that
//! failed; there is no retry and no partial result.

use std::fmt;

use thiserror::Error;

/// The pipeline stage where a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Stage 1: quiz generation from the source text.
    Generation,
    /// Stage 2: review of the generated quiz.
    Review,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Generation => write!(f, "generation"),
            Stage::Review => write!(f, "review"),
        }
    }
}

/// Errors that can occur during a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The provider call for a stage failed (network, auth, rate limit,
    /// service error). The underlying `ProviderError` is preserved as the
    /// source for callers that want to classify it.
    #[error("quiz {stage} stage failed: {source:#}")]
    StageFailed {
        stage: Stage,
        #[source]
        source: anyhow::Error,
    },

    /// A stage returned an empty completion.
    #[error("quiz {stage} stage returned an empty completion")]
    EmptyCompletion { stage: Stage },
}

impl PipelineError {
    /// The stage this error originated from.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::StageFailed { stage, .. } => *stage,
            PipelineError::EmptyCompletion { stage } => *stage,
        }
    }
}
