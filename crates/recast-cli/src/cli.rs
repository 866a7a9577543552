//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use recast::ExportFormat;
use std::path::PathBuf;

/// Recast: rewrite quiz questions with regional and cultural context
#[derive(Parser)]
#[command(name = "recast")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a quiz file, check it and list its rows
    Inspect {
        /// Path to the quiz file (CSV/TSV/XLSX)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only list rows whose question contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the prompt that would be sent for a row
    Prompt {
        /// Path to the quiz file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Row number (1-based)
        #[arg(short, long)]
        row: usize,
    },

    /// Generate candidate rewrites for one row
    Generate {
        /// Path to the quiz file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Row number (1-based)
        #[arg(short, long)]
        row: usize,

        #[command(flatten)]
        llm: LlmArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the review server
    Review {
        /// Path to the quiz file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Port for the server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        #[command(flatten)]
        llm: LlmArgs,
    },

    /// Generate for one row, commit a candidate unedited and export
    Apply {
        /// Path to the quiz file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Row number (1-based)
        #[arg(short, long)]
        row: usize,

        /// Candidate number to commit (1-based)
        #[arg(short = 'k', long, default_value = "1")]
        candidate: usize,

        /// Output path (default: updated_questions_<timestamp>.<ext> next to FILE)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default: from the output extension, else csv)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        #[command(flatten)]
        llm: LlmArgs,
    },
}

/// Model selection shared by the generating commands.
#[derive(Args, Clone, Debug)]
pub struct LlmArgs {
    /// LLM provider
    #[arg(long, default_value = "gemini")]
    pub llm: LlmProviderChoice,

    /// Model to use (provider-specific, e.g., "gemini-2.0-flash", "gpt-4o", "llama3.2")
    #[arg(long)]
    pub model: Option<String>,

    /// Model calls per generation
    #[arg(long)]
    pub fan_out: Option<usize>,
}

/// LLM provider choice
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LlmProviderChoice {
    /// No LLM - browse and edit only
    None,
    /// Google Gemini API (requires GEMINI_API_KEY or GOOGLE_API_KEY)
    #[default]
    Gemini,
    /// Anthropic Claude API (requires ANTHROPIC_API_KEY)
    Anthropic,
    /// OpenAI GPT API (requires OPENAI_API_KEY)
    OpenAI,
    /// Ollama local models (requires Ollama running)
    Ollama,
    /// Mock provider for testing and offline runs
    Mock,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(LlmProviderChoice::None),
            "gemini" | "google" => Ok(LlmProviderChoice::Gemini),
            "anthropic" | "claude" => Ok(LlmProviderChoice::Anthropic),
            "openai" | "gpt" => Ok(LlmProviderChoice::OpenAI),
            "ollama" | "local" => Ok(LlmProviderChoice::Ollama),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            _ => Err(format!(
                "Unknown provider: {}. Use: none, gemini, anthropic, openai, ollama, or mock.",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::None => write!(f, "none"),
            LlmProviderChoice::Gemini => write!(f, "gemini"),
            LlmProviderChoice::Anthropic => write!(f, "anthropic"),
            LlmProviderChoice::OpenAI => write!(f, "openai"),
            LlmProviderChoice::Ollama => write!(f, "ollama"),
            LlmProviderChoice::Mock => write!(f, "mock"),
        }
    }
}
