//! The `quizforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizforge.toml
    if std::path::Path::new("quizforge.toml").exists() {
        println!("quizforge.toml already exists, skipping.");
    } else {
        std::fs::write("quizforge.toml", SAMPLE_CONFIG)?;
        println!("Created quizforge.toml");
    }

    // Create example format template
    if std::path::Path::new("template.json").exists() {
        println!("template.json already exists, skipping.");
    } else {
        std::fs::write("template.json", EXAMPLE_TEMPLATE)?;
        println!("Created template.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizforge.toml with your API keys");
    println!("  2. Run: quizforge validate-template --template template.json");
    println!("  3. Run: quizforge generate --input notes.txt --count 5 --subject Science");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

default_provider = "openai"
default_model = "gpt-3.5-turbo"
default_temperature = 0.7
default_max_tokens = 2048

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.anthropic]
type = "anthropic"
api_key = "${ANTHROPIC_API_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"
"#;

const EXAMPLE_TEMPLATE: &str = r#"{
  "1": {
    "no": "1",
    "mcq": "multiple choice question",
    "options": {
      "a": "choice here",
      "b": "choice here",
      "c": "choice here",
      "d": "choice here"
    },
    "correct": "correct answer"
  },
  "2": {
    "no": "2",
    "mcq": "multiple choice question",
    "options": {
      "a": "choice here",
      "b": "choice here",
      "c": "choice here",
      "d": "choice here"
    },
    "correct": "correct answer"
  },
  "3": {
    "no": "3",
    "mcq": "multiple choice question",
    "options": {
      "a": "choice here",
      "b": "choice here",
      "c": "choice here",
      "d": "choice here"
    },
    "correct": "correct answer"
  }
}
"#;
