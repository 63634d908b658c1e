//! quizforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "LLM multiple-choice quiz generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a quiz from a text document and have the model review it
    Generate {
        /// Plain-text input file (PDFs are not supported; convert first)
        #[arg(long)]
        input: PathBuf,

        /// Number of multiple-choice questions to generate
        #[arg(long, value_parser = clap::value_parser!(u32).range(3..=50))]
        count: u32,

        /// Audience subject, e.g. "Science" (max 20 chars)
        #[arg(long)]
        subject: String,

        /// Complexity level of the questions, e.g. "Simple" (max 20 chars)
        #[arg(long, default_value = "Simple")]
        tone: String,

        /// JSON format exemplar; defaults to the built-in three-question shape
        #[arg(long)]
        template: Option<PathBuf>,

        /// Provider to use (defaults to the config's default_provider)
        #[arg(long)]
        provider: Option<String>,

        /// Model to use (defaults to the config's default_model)
        #[arg(long)]
        model: Option<String>,

        /// Sampling temperature (defaults to the config's default_temperature)
        #[arg(long)]
        temperature: Option<f64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the raw model output when the quiz cannot be parsed
        #[arg(long)]
        show_raw: bool,
    },

    /// Check a format exemplar JSON file for common problems
    ValidateTemplate {
        /// Path to the template JSON file
        #[arg(long)]
        template: PathBuf,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and example template
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            input,
            count,
            subject,
            tone,
            template,
            provider,
            model,
            temperature,
            config,
            show_raw,
        } => {
            commands::generate::execute(
                input,
                count,
                subject,
                tone,
                template,
                provider,
                model,
                temperature,
                config,
                show_raw,
            )
            .await
        }
        Commands::ValidateTemplate { template } => commands::validate_template::execute(template),
        Commands::ListModels { provider, config } => {
            commands::list_models::execute(provider, config)
        }
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
