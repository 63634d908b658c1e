//! The `quizforge validate-template` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizforge_core::model::FormatTemplate;

pub fn execute(template_path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&template_path)
        .with_context(|| format!("failed to read template: {}", template_path.display()))?;
    let template = FormatTemplate::from_json_str(&content)
        .with_context(|| format!("failed to parse template: {}", template_path.display()))?;

    println!(
        "Template: {} ({} questions)",
        template_path.display(),
        template.len()
    );

    let warnings = validate_template(&template);
    for w in &warnings {
        println!("  WARNING: {w}");
    }

    if warnings.is_empty() {
        println!("Template is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

/// Placeholder used by the built-in exemplar; it never matches the
/// "choice here" option placeholders and is not a real answer.
const PLACEHOLDER_CORRECT: &str = "correct answer";

/// Check a template for shapes that tend to confuse the model.
fn validate_template(template: &FormatTemplate) -> Vec<String> {
    let mut warnings = Vec::new();

    if template.is_empty() {
        warnings.push("template has no questions".to_string());
        return warnings;
    }

    for (key, question) in template.entries() {
        if key.trim().parse::<u32>().is_err() {
            warnings.push(format!("question index {key:?} is not numeric"));
        }
        if question.mcq.trim().is_empty() {
            warnings.push(format!("question {key} has an empty mcq field"));
        }
        if question.options.is_empty() {
            warnings.push(format!("question {key} has no options"));
        }
        if question.correct.trim().is_empty() {
            warnings.push(format!("question {key} has an empty correct field"));
        } else if question.correct != PLACEHOLDER_CORRECT
            && !question.options.values().any(|v| v == &question.correct)
        {
            warnings.push(format!(
                "question {key}: correct answer {:?} is not among the options",
                question.correct
            ));
        }
    }

    // Indices should run 1..N without gaps so the exemplar demonstrates the
    // numbering the prompt asks for.
    let mut indices: Vec<u32> = template
        .entries()
        .keys()
        .filter_map(|k| k.trim().parse::<u32>().ok())
        .collect();
    indices.sort_unstable();
    let sequential = indices.iter().enumerate().all(|(i, &n)| n == (i as u32) + 1);
    if !sequential {
        warnings.push("question indices are not sequential from 1".to_string());
    }

    warnings
}
