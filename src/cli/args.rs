//! Command line argument parsing for the Palaver CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Palaver - an intent-classification chatbot
#[derive(Parser, Debug, Clone)]
#[command(name = "palaver")]
#[command(about = "An intent-classification chatbot trained on a JSON corpus")]
#[command(version = crate::VERSION)]
#[command(long_about = None)]
pub struct PalaverArgs {
    /// Verbosity level (0=errors, 1=warnings, 2=info, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "PALAVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PalaverArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to warnings
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Chat interactively on standard input
    Chat(ChatArgs),

    /// Reply to a single message
    Ask(AskArgs),

    /// Show the conversation history
    History(HistoryArgs),

    /// Measure how many training patterns are classified back to their own intent
    Evaluate(EvaluateArgs),

    /// Check a corpus file without training
    Validate(ValidateArgs),
}

/// Arguments for an interactive chat
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Intent corpus file (JSON)
    #[arg(long, value_name = "CORPUS_FILE", env = "PALAVER_CORPUS", default_value = "intents.json")]
    pub corpus: PathBuf,

    /// Conversation log file (CSV)
    #[arg(long, value_name = "LOG_FILE", default_value = "chat_log.csv")]
    pub log: PathBuf,

    /// Don't record the conversation
    #[arg(long)]
    pub no_log: bool,

    /// Seed for response selection
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for a one-shot reply
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// Intent corpus file (JSON)
    #[arg(long, value_name = "CORPUS_FILE", env = "PALAVER_CORPUS", default_value = "intents.json")]
    pub corpus: PathBuf,

    /// Seed for response selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Message to reply to
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for showing the history
#[derive(Parser, Debug, Clone)]
pub struct HistoryArgs {
    /// Conversation log file (CSV)
    #[arg(long, value_name = "LOG_FILE", default_value = "chat_log.csv")]
    pub log: PathBuf,
}

/// Arguments for evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Intent corpus file (JSON)
    #[arg(long, value_name = "CORPUS_FILE", env = "PALAVER_CORPUS", default_value = "intents.json")]
    pub corpus: PathBuf,
}

/// Arguments for corpus validation
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Intent corpus file (JSON)
    #[arg(long, value_name = "CORPUS_FILE", env = "PALAVER_CORPUS", default_value = "intents.json")]
    pub corpus: PathBuf,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
