//! Prompt templates for the two pipeline stages.
//!
//! Both stages are plain text interpolation; there is no template engine.
//! The generation prompt embeds the format exemplar verbatim so the model
//! mirrors its shape.

use crate::model::{QuizArtifact, QuizRequest};

/// System prompt for the generation stage.
pub const GENERATION_SYSTEM_PROMPT: &str = "You are an expert MCQ maker. Respond ONLY with the quiz as a JSON object shaped like the exemplar. Do not add prose before or after the JSON.";

/// System prompt for the review stage.
pub const REVIEW_SYSTEM_PROMPT: &str = "You are an expert English grammarian and writer who reviews quizzes for difficulty and fit to their audience.";

/// Render the stage-1 prompt: quiz generation from source text.
///
/// The contract stated here (exactly `question_count` non-repeating
/// questions conforming to the text) is advisory; nothing verifies the
/// model honored it.
pub fn render_generation_prompt(request: &QuizRequest) -> String {
    format!(
        "Text: {text}\n\
         You are an expert MCQ maker. Given the above text, it is your job to \
         create a quiz of {number} multiple choice questions for {subject} \
         students in {tone} tone.\n\
         Make sure the questions are not repeated and check all the questions \
         to be conforming to the text as well.\n\
         Make sure to format your response exactly like RESPONSE_JSON below and \
         use it as a guide. Ensure to make {number} MCQs.\n\
         ### RESPONSE_JSON\n\
         {response_json}\n",
        text = request.source_text,
        number = request.question_count,
        subject = request.subject,
        tone = request.tone,
        response_json = request.format_template.to_prompt_json(),
    )
}

/// Render the stage-2 prompt: review of the generated quiz.
///
/// Taking `&QuizArtifact` makes the stage-2-needs-stage-1 dependency a
/// type-level contract rather than an ordering convention.
pub fn render_review_prompt(subject: &str, quiz: &QuizArtifact) -> String {
    format!(
        "You are an expert English grammarian and writer. Given a multiple \
         choice quiz for {subject} students, you need to evaluate the \
         complexity of the questions and give a complete analysis of the quiz. \
         Only use at most 50 words for the complexity analysis.\n\
         If the quiz is not up to par with the cognitive and analytical \
         abilities of the students, update the quiz questions that need to be \
         changed and change the tone such that it perfectly fits the students' \
         abilities.\n\
         Quiz_MCQs:\n\
         {quiz}\n\
         \n\
         Check from an expert English writer of the above quiz:\n",
        subject = subject,
        quiz = quiz.text,
    )
}
