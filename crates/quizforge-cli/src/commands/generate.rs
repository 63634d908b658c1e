//! The `quizforge generate` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use quizforge_core::model::{FormatTemplate, QuizOutput, QuizRequest, QuizRow};
use quizforge_core::parser::parse_quiz;
use quizforge_core::pipeline::{PipelineConfig, QuizPipeline};
use quizforge_providers::config::load_config_from;
use quizforge_providers::create_provider;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    input: PathBuf,
    count: u32,
    subject: String,
    tone: String,
    template_path: Option<PathBuf>,
    provider_name: Option<String>,
    model: Option<String>,
    temperature: Option<f64>,
    config_path: Option<PathBuf>,
    show_raw: bool,
) -> Result<()> {
    // Validate inputs (count is bounded 3..=50 by clap already)
    anyhow::ensure!(
        subject.chars().count() <= 20,
        "subject must be at most 20 characters"
    );
    anyhow::ensure!(
        tone.chars().count() <= 20,
        "tone must be at most 20 characters"
    );
    if let Some(t) = temperature {
        anyhow::ensure!(
            (0.0..=2.0).contains(&t),
            "temperature must be between 0.0 and 2.0"
        );
    }

    // Read the source text. Extraction from other formats is out of scope.
    if input.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pdf")) {
        anyhow::bail!(
            "PDF extraction is not supported; convert {} to plain text first",
            input.display()
        );
    }
    let source_text = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read input file: {}", input.display()))?;
    anyhow::ensure!(
        !source_text.trim().is_empty(),
        "input file is empty: {}",
        input.display()
    );

    // Load the format exemplar
    let format_template = match &template_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read template: {}", path.display()))?;
            FormatTemplate::from_json_str(&content)
                .with_context(|| format!("failed to parse template: {}", path.display()))?
        }
        None => FormatTemplate::default(),
    };

    // Load config and build the provider
    let config = load_config_from(config_path.as_deref())?;
    let provider_name = provider_name.unwrap_or_else(|| config.default_provider.clone());
    let Some(provider_config) = config.providers.get(&provider_name) else {
        anyhow::bail!(
            "provider '{}' not found in config. Available: {:?}",
            provider_name,
            config.providers.keys().collect::<Vec<_>>()
        );
    };
    let provider = Arc::from(create_provider(&provider_name, provider_config)?);

    let pipeline_config = PipelineConfig {
        model: model.unwrap_or_else(|| config.default_model.clone()),
        temperature: temperature.unwrap_or(config.default_temperature),
        max_tokens: config.default_max_tokens,
    };

    eprintln!(
        "Generating {count} MCQs for {subject} students ({tone} tone) from {}...",
        input.display()
    );

    let pipeline = QuizPipeline::new(provider, pipeline_config);
    let request = QuizRequest {
        source_text,
        question_count: count,
        subject,
        tone,
        format_template,
    };

    let output = pipeline.run(&request).await?;

    // Display-time parsing; a malformed quiz is not a pipeline failure.
    match parse_quiz(&output.quiz) {
        Ok(rows) if rows.is_empty() => {
            println!("The model returned no questions.");
        }
        Ok(rows) => print_quiz_table(&rows),
        Err(e) => {
            println!("Could not parse the quiz output: {e}");
            if show_raw {
                println!("\nRaw quiz output:\n{}", output.quiz.text);
            } else {
                println!("Re-run with --show-raw to inspect the raw output.");
            }
        }
    }

    print_review(&output);

    Ok(())
}

fn print_quiz_table(rows: &[QuizRow]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["No", "Question", "Options", "Correct"]);

    for (i, row) in rows.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&row.mcq),
            Cell::new(&row.options),
            Cell::new(&row.correct),
        ]);
    }

    println!("{table}");
}

fn print_review(output: &QuizOutput) {
    println!("\nReview:");
    println!("{}", output.review.text);
    println!(
        "\nTokens: {} prompt, {} completion, {} total",
        output.usage.prompt_tokens, output.usage.completion_tokens, output.usage.total_tokens
    );
}
