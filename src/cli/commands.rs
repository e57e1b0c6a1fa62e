//! Command implementations for the Palaver CLI.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::chatbot::{Chatbot, is_farewell};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::PalaverConfig;
use crate::corpus::IntentCorpus;
use crate::history::{ConversationLog, CsvConversationLog};
use crate::ml::intent_classifier;

/// Farewell printed when a conversation ends.
pub const CLOSING_MESSAGE: &str = "Thank you for chatting with me. Have a great day!";

/// Execute a CLI command.
pub fn execute_command(args: PalaverArgs) -> Result<()> {
    match &args.command {
        Command::Chat(chat_args) => chat(chat_args.clone(), &args),
        Command::Ask(ask_args) => ask(ask_args.clone(), &args),
        Command::History(history_args) => show_history(history_args.clone(), &args),
        Command::Evaluate(evaluate_args) => evaluate(evaluate_args.clone(), &args),
        Command::Validate(validate_args) => validate_corpus(validate_args.clone(), &args),
    }
}

/// Load the configuration file if one was given.
fn load_config(cli_args: &PalaverArgs) -> Result<PalaverConfig> {
    match &cli_args.config {
        Some(path) => PalaverConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(PalaverConfig::default()),
    }
}

fn load_corpus(path: &Path) -> Result<IntentCorpus> {
    IntentCorpus::from_path(path)
        .with_context(|| format!("failed to load corpus from {}", path.display()))
}

fn build_chatbot(corpus_path: &Path, seed: Option<u64>, cli_args: &PalaverArgs) -> Result<Chatbot> {
    let mut config = load_config(cli_args)?;
    if seed.is_some() {
        config.seed = seed;
    }
    let corpus = load_corpus(corpus_path)?;
    Chatbot::train(corpus, &config)
        .with_context(|| format!("failed to train on {}", corpus_path.display()))
}

/// Chat on standard input and output.
fn chat(args: ChatArgs, cli_args: &PalaverArgs) -> Result<()> {
    let chatbot = build_chatbot(&args.corpus, args.seed, cli_args)?;
    let log = (!args.no_log).then(|| CsvConversationLog::new(&args.log));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let exchanges = run_chat(
        &chatbot,
        log.as_ref().map(|log| log as &dyn ConversationLog),
        stdin.lock(),
        stdout.lock(),
        cli_args.output_format,
    )?;

    log::info!("conversation ended after {exchanges} exchanges");
    Ok(())
}

/// Run a conversation until end of input or a farewell reply.
///
/// Blank lines are skipped. Returns the number of exchanges.
pub fn run_chat<R: BufRead, W: Write>(
    chatbot: &Chatbot,
    log: Option<&dyn ConversationLog>,
    input: R,
    mut output: W,
    format: OutputFormat,
) -> Result<usize> {
    let human = format == OutputFormat::Human;
    let mut exchanges = 0;

    if human {
        write!(output, "You: ")?;
        output.flush()?;
    }
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let text = line.trim();
        if text.is_empty() {
            if human {
                write!(output, "You: ")?;
                output.flush()?;
            }
            continue;
        }

        let exchange = chatbot.exchange(text);
        exchanges += 1;
        if let Some(log) = log {
            log.append(&exchange)
                .context("failed to append to the conversation log")?;
        }

        if human {
            writeln!(output, "Bot: {}", exchange.reply_text)?;
        } else {
            writeln!(output, "{}", serde_json::to_string(&exchange)?)?;
        }

        if is_farewell(&exchange.reply_text) {
            if human {
                writeln!(output, "{CLOSING_MESSAGE}")?;
            }
            break;
        }
        if human {
            write!(output, "You: ")?;
            output.flush()?;
        }
    }

    Ok(exchanges)
}

/// Reply to one message.
fn ask(args: AskArgs, cli_args: &PalaverArgs) -> Result<()> {
    let chatbot = build_chatbot(&args.corpus, args.seed, cli_args)?;

    let prediction = chatbot.classify(&args.text);
    let response = chatbot.respond(&args.text).to_string();

    if cli_args.output_format == OutputFormat::Human && cli_args.verbosity() < 2 {
        println!("{response}");
        return Ok(());
    }

    output_result(
        "Reply",
        &AskResult {
            input: args.text,
            tag: prediction.tag,
            probability: prediction.probability,
            response,
        },
        cli_args,
    )?;
    Ok(())
}

/// Print the conversation history.
fn show_history(args: HistoryArgs, cli_args: &PalaverArgs) -> Result<()> {
    let log = CsvConversationLog::new(&args.log);
    let exchanges = log
        .records()
        .with_context(|| format!("failed to read history from {}", args.log.display()))?;

    output_result(
        "Conversation history",
        &HistoryResult {
            path: args.log.to_string_lossy().to_string(),
            exchanges,
        },
        cli_args,
    )?;
    Ok(())
}

/// Report training-set self-consistency.
fn evaluate(args: EvaluateArgs, cli_args: &PalaverArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    let corpus = load_corpus(&args.corpus)?;
    let classifier = intent_classifier::train(&corpus, &config)
        .with_context(|| format!("failed to train on {}", args.corpus.display()))?;

    let evaluation = intent_classifier::evaluate(&classifier, &corpus);
    let stats = classifier.stats();

    output_result(
        "Evaluation completed",
        &EvaluationResult {
            patterns: evaluation.total,
            correct: evaluation.correct,
            accuracy: evaluation.accuracy(),
            iterations: stats.iterations,
            converged: stats.converged,
            misses: evaluation.misses,
        },
        cli_args,
    )?;
    Ok(())
}

/// Validate a corpus file.
fn validate_corpus(args: ValidateArgs, cli_args: &PalaverArgs) -> Result<()> {
    let corpus = load_corpus(&args.corpus)?;
    let stats = corpus.stats();

    output_result(
        "Corpus is valid",
        &CorpusValidationResult {
            path: args.corpus.to_string_lossy().to_string(),
            intents: stats.intents,
            patterns: stats.patterns,
            responses: stats.responses,
            tags: corpus.tags().map(str::to_string).collect(),
        },
        cli_args,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Intent;
    use crate::history::MemoryConversationLog;

    fn chatbot() -> Chatbot {
        let corpus = IntentCorpus::new(vec![
            Intent::new("greeting", ["hi", "hello"], ["Hello!"]),
            Intent::new("farewell", ["bye", "goodbye"], ["Goodbye"]),
        ])
        .unwrap();
        let config = PalaverConfig {
            seed: Some(0),
            ..Default::default()
        };
        Chatbot::train(corpus, &config).unwrap()
    }

    #[test]
    fn test_run_chat_stops_on_farewell() {
        let chatbot = chatbot();
        let log = MemoryConversationLog::new();
        let input = "hello\n\nbye\nhello again\n".as_bytes();
        let mut output = Vec::new();

        let exchanges = run_chat(
            &chatbot,
            Some(&log),
            input,
            &mut output,
            OutputFormat::Human,
        )
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(exchanges, 2);
        assert!(output.contains("Bot: Hello!"));
        assert!(output.contains("Bot: Goodbye"));
        assert!(output.contains(CLOSING_MESSAGE));

        let records = log.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].user_input, "bye");
    }

    #[test]
    fn test_run_chat_json_lines() {
        let chatbot = chatbot();
        let mut output = Vec::new();

        let exchanges =
            run_chat(&chatbot, None, "hi\n".as_bytes(), &mut output, OutputFormat::Json).unwrap();

        let output = String::from_utf8(output).unwrap();
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(exchanges, 1);
        assert_eq!(value["user_text"], "hi");
        assert_eq!(value["reply_text"], "Hello!");
    }
}
