//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, PalaverArgs};
use crate::error::Result;
use crate::history::LogRecord;
use crate::ml::intent_classifier::Misclassification;

/// Result structure for a one-shot reply.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResult {
    pub input: String,
    pub tag: String,
    pub probability: f64,
    pub response: String,
}

/// Result structure for evaluation.
#[derive(Debug, Serialize)]
pub struct EvaluationResult {
    pub patterns: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub iterations: usize,
    pub converged: bool,
    pub misses: Vec<Misclassification>,
}

/// Result structure for corpus validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusValidationResult {
    pub path: String,
    pub intents: usize,
    pub patterns: usize,
    pub responses: usize,
    pub tags: Vec<String>,
}

/// Result structure for the conversation history.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub path: String,
    pub exchanges: Vec<LogRecord>,
}

/// Output a result in the requested format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &PalaverArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result in the requested format.
pub fn write_result<W: Write, T: Serialize>(
    out: &mut W,
    message: &str,
    result: &T,
    args: &PalaverArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => write_human(out, message, result, args),
        OutputFormat::Json => write_json(out, result, args),
    }
}

/// Output in human-readable format.
fn write_human<W: Write, T: Serialize>(
    out: &mut W,
    message: &str,
    result: &T,
    args: &PalaverArgs,
) -> Result<()> {
    if args.verbosity() > 1 {
        writeln!(out, "{message}")?;
        writeln!(out)?;
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    if let Some(exchanges) = value.get("exchanges").and_then(|v| v.as_array()) {
        return write_history_human(out, exchanges);
    }

    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in &obj {
                if let serde_json::Value::Array(items) = val {
                    if items.iter().any(|item| item.is_object()) {
                        writeln!(out, "{key}:")?;
                        for item in items {
                            writeln!(out, "  - {}", format_object_inline(item))?;
                        }
                        continue;
                    }
                }
                writeln!(out, "{key}: {}", format_value(val))?;
            }
        }
        other => writeln!(out, "{}", format_value(&other))?,
    }
    Ok(())
}

fn write_history_human<W: Write>(out: &mut W, exchanges: &[serde_json::Value]) -> Result<()> {
    if exchanges.is_empty() {
        writeln!(out, "No conversation history found. Start chatting first!")?;
        return Ok(());
    }

    for exchange in exchanges {
        let field = |name: &str| {
            exchange
                .get(name)
                .map(format_value)
                .unwrap_or_default()
        };
        writeln!(out, "[{}]", field("Timestamp"))?;
        writeln!(out, "You: {}", field("User Input"))?;
        writeln!(out, "Bot: {}", field("Chatbot Response"))?;
        writeln!(out)?;
    }
    Ok(())
}

/// Output in JSON format.
fn write_json<W: Write, T: Serialize>(out: &mut W, result: &T, args: &PalaverArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(out, "{json}")?;
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => format_object_inline(value),
        serde_json::Value::Null => "null".to_string(),
    }
}

fn format_object_inline(value: &serde_json::Value) -> String {
    match value.as_object() {
        Some(obj) => obj
            .iter()
            .map(|(key, val)| format!("{key}={}", format_value(val)))
            .collect::<Vec<_>>()
            .join(" "),
        None => format_value(value),
    }
}
