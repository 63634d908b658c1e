//! The two-stage quiz pipeline.
//!
//! A strictly sequential two-node flow: stage 1 generates the quiz from
//! the source text, stage 2 reviews that quiz. There is no branching, no
//! fan-out, no retry, and no cancellation once started; the pipeline only
//! suspends at the provider-call boundary.

use std::sync::Arc;

use tracing::instrument;

use crate::error::{PipelineError, Stage};
use crate::model::{QuizArtifact, QuizOutput, QuizRequest, ReviewArtifact};
use crate::prompts::{
    render_generation_prompt, render_review_prompt, GENERATION_SYSTEM_PROMPT,
    REVIEW_SYSTEM_PROMPT,
};
use crate::traits::{CompletionProvider, CompletionRequest, CompletionResponse};

/// Fixed per-process settings for the pipeline.
///
/// Built once from configuration at startup and treated as immutable for
/// the process lifetime; there are no module-level globals.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Model identifier passed to the provider.
    pub model: String,
    /// Sampling temperature for both stages.
    pub temperature: f64,
    /// Max tokens per stage.
    pub max_tokens: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
        }
    }
}

/// The generate-then-review quiz pipeline.
///
/// Holds no mutable state; each `run` is independent, so one pipeline can
/// serve any number of sequential invocations.
pub struct QuizPipeline {
    provider: Arc<dyn CompletionProvider>,
    config: PipelineConfig,
}

impl QuizPipeline {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: PipelineConfig) -> Self {
        Self { provider, config }
    }

    /// Run both stages and return the combined output.
    ///
    /// The review stage is only invoked after a successful generation
    /// stage; a failure in either stage fails the whole run with no
    /// partial result. Stage-1 output is never validated before being fed
    /// to stage 2, so a malformed quiz still gets reviewed.
    #[instrument(skip(self, request), fields(model = %self.config.model, count = request.question_count))]
    pub async fn run(&self, request: &QuizRequest) -> Result<QuizOutput, PipelineError> {
        let generation = self
            .complete_stage(
                Stage::Generation,
                render_generation_prompt(request),
                GENERATION_SYSTEM_PROMPT,
            )
            .await?;
        let quiz = QuizArtifact {
            text: generation.content,
        };
        tracing::debug!(chars = quiz.text.len(), "generation stage complete");

        let review = self
            .complete_stage(
                Stage::Review,
                render_review_prompt(&request.subject, &quiz),
                REVIEW_SYSTEM_PROMPT,
            )
            .await?;
        tracing::debug!(chars = review.content.len(), "review stage complete");

        Ok(QuizOutput {
            quiz,
            review: ReviewArtifact {
                text: review.content,
            },
            usage: generation.token_usage.combine(review.token_usage),
        })
    }

    async fn complete_stage(
        &self,
        stage: Stage,
        prompt: String,
        system_prompt: &str,
    ) -> Result<CompletionResponse, PipelineError> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            prompt,
            system_prompt: Some(system_prompt.to_string()),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            stop_sequences: vec![],
        };

        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(|source| PipelineError::StageFailed { stage, source })?;

        if response.content.trim().is_empty() {
            return Err(PipelineError::EmptyCompletion { stage });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::model::{FormatTemplate, TokenUsage};
    use crate::parser::parse_quiz;
    use crate::traits::ModelInfo;

    /// Stub provider that replays scripted stage responses in order.
    struct StubProvider {
        responses: Mutex<VecDeque<anyhow::Result<String>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl StubProvider {
        fn new(responses: Vec<anyhow::Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> anyhow::Result<CompletionResponse> {
            self.requests.lock().unwrap().push(request.clone());
            let content = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(String::new()))?;
            Ok(CompletionResponse {
                content,
                model: request.model.clone(),
                token_usage: TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 20,
                    total_tokens: 30,
                },
                latency_ms: 1,
            })
        }

        fn available_models(&self) -> Vec<ModelInfo> {
            vec![]
        }
    }

    fn science_request(count: u32) -> QuizRequest {
        QuizRequest {
            source_text: "Water boils at 100°C at sea level.".into(),
            question_count: count,
            subject: "Science".into(),
            tone: "Simple".into(),
            format_template: FormatTemplate::default(),
        }
    }

    fn pipeline(provider: StubProvider) -> (Arc<StubProvider>, QuizPipeline) {
        let provider = Arc::new(provider);
        let pipeline = QuizPipeline::new(
            Arc::clone(&provider) as Arc<dyn CompletionProvider>,
            PipelineConfig::default(),
        );
        (provider, pipeline)
    }

    #[tokio::test]
    async fn run_returns_both_artifacts_and_sums_usage() {
        let quiz_json = FormatTemplate::default().to_prompt_json();
        let (provider, pipeline) = pipeline(StubProvider::new(vec![
            Ok(quiz_json),
            Ok("The quiz fits Science students well.".into()),
        ]));

        let output = pipeline.run(&science_request(3)).await.unwrap();
        assert!(!output.quiz.text.is_empty());
        assert!(output.review.text.contains("fits Science students"));
        assert_eq!(output.usage.total_tokens, 60);
        assert_eq!(provider.requests().len(), 2);
    }

    #[tokio::test]
    async fn review_stage_receives_generated_quiz() {
        let (provider, pipeline) = pipeline(StubProvider::new(vec![
            Ok("{\"1\": {\"mcq\": \"distinctive question text\"}}".into()),
            Ok("fine".into()),
        ]));

        pipeline.run(&science_request(3)).await.unwrap();

        let requests = provider.requests();
        assert!(requests[0].prompt.contains("Water boils"));
        assert!(requests[1].prompt.contains("distinctive question text"));
        assert!(requests[1].prompt.contains("Science students"));
    }

    #[tokio::test]
    async fn generation_failure_skips_review() {
        let (provider, pipeline) = pipeline(StubProvider::new(vec![Err(anyhow::anyhow!(
            "network error: connection refused"
        ))]));

        let err = pipeline.run(&science_request(3)).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Generation);
        assert!(err.to_string().contains("generation stage failed"));
        assert_eq!(provider.requests().len(), 1, "review must not be invoked");
    }

    #[tokio::test]
    async fn empty_generation_is_an_error() {
        let (provider, pipeline) =
            pipeline(StubProvider::new(vec![Ok("   \n".into()), Ok("unused".into())]));

        let err = pipeline.run(&science_request(3)).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::EmptyCompletion {
                stage: Stage::Generation
            }
        ));
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn review_failure_discards_quiz() {
        let (_, pipeline) = pipeline(StubProvider::new(vec![
            Ok("{\"1\": {\"mcq\": \"q\", \"options\": {}, \"correct\": \"x\"}}".into()),
            Err(anyhow::anyhow!("rate limited, retry after 5000ms")),
        ]));

        let err = pipeline.run(&science_request(3)).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Review);
    }

    #[tokio::test]
    async fn malformed_generation_still_gets_reviewed() {
        let (provider, pipeline) = pipeline(StubProvider::new(vec![
            Ok("this is not json at all".into()),
            Ok("This does not look like a quiz.".into()),
        ]));

        // The pipeline itself succeeds; only display-time parsing fails.
        let output = pipeline.run(&science_request(3)).await.unwrap();
        assert_eq!(provider.requests().len(), 2);
        assert!(parse_quiz(&output.quiz).is_err());
        assert!(!output.review.text.is_empty());
    }

    #[tokio::test]
    async fn exemplar_response_parses_to_three_rows() {
        let quiz_json = FormatTemplate::default().to_prompt_json();
        let (_, pipeline) = pipeline(StubProvider::new(vec![
            Ok(quiz_json),
            Ok("Appropriately simple for the audience.".into()),
        ]));

        let output = pipeline.run(&science_request(3)).await.unwrap();
        let rows = parse_quiz(&output.quiz).unwrap();
        assert_eq!(rows.len(), 3);
        for label in ["a:", "b:", "c:", "d:"] {
            assert!(rows[0].options.contains(label));
        }
    }
}
