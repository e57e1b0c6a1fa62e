//! Conversation history.
//!
//! Exchanges are appended to a [`ConversationLog`]. The CSV log writes one
//! row per exchange under the header `User Input,Chatbot Response,Timestamp`
//! with timestamps formatted as `%Y-%m-%d %H:%M:%S`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::chatbot::Exchange;
use crate::error::Result;

/// Timestamp format of logged exchanges.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A logged exchange as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "User Input")]
    pub user_input: String,
    #[serde(rename = "Chatbot Response")]
    pub chatbot_response: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl From<&Exchange> for LogRecord {
    fn from(exchange: &Exchange) -> Self {
        LogRecord {
            user_input: exchange.user_text.clone(),
            chatbot_response: exchange.reply_text.clone(),
            timestamp: exchange.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Storage for conversation history.
pub trait ConversationLog: Send + Sync {
    /// Append one exchange.
    fn append(&self, exchange: &Exchange) -> Result<()>;

    /// All logged exchanges, oldest first.
    fn records(&self) -> Result<Vec<LogRecord>>;
}

/// CSV file log. The file and its header are created on first append.
#[derive(Debug, Clone)]
pub struct CsvConversationLog {
    path: PathBuf,
}

impl CsvConversationLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationLog for CsvConversationLog {
    fn append(&self, exchange: &Exchange) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(LogRecord::from(exchange))?;
        writer.flush()?;
        Ok(())
    }

    /// Returns no records when the file does not exist yet.
    fn records(&self) -> Result<Vec<LogRecord>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let records = reader
            .deserialize()
            .collect::<std::result::Result<Vec<LogRecord>, csv::Error>>()?;
        Ok(records)
    }
}

/// In-memory log.
#[derive(Debug, Default)]
pub struct MemoryConversationLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryConversationLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationLog for MemoryConversationLog {
    fn append(&self, exchange: &Exchange) -> Result<()> {
        self.records.lock().push(LogRecord::from(exchange));
        Ok(())
    }

    fn records(&self) -> Result<Vec<LogRecord>> {
        Ok(self.records.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn exchange(user: &str, reply: &str) -> Exchange {
        Exchange {
            user_text: user.to_string(),
            reply_text: reply.to_string(),
            timestamp: Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
        }
    }

    #[test]
    fn test_log_record_from_exchange() {
        let record = LogRecord::from(&exchange("hi", "Hello!"));

        assert_eq!(record.user_input, "hi");
        assert_eq!(record.chatbot_response, "Hello!");
        assert_eq!(record.timestamp, "2024-03-09 14:05:07");
    }

    #[test]
    fn test_csv_log_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_log.csv");
        let log = CsvConversationLog::new(&path);

        log.append(&exchange("hi", "Hello!")).unwrap();
        log.append(&exchange("tell me, a joke", "Why \"not\"?")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "User Input,Chatbot Response,Timestamp");
        assert_eq!(lines[1], "hi,Hello!,2024-03-09 14:05:07");
        assert_eq!(lines.len(), 3);

        let records = log.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].user_input, "tell me, a joke");
        assert_eq!(records[1].chatbot_response, "Why \"not\"?");
    }

    #[test]
    fn test_csv_log_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvConversationLog::new(dir.path().join("missing.csv"));

        assert!(log.records().unwrap().is_empty());
        assert_eq!(log.path(), dir.path().join("missing.csv"));
    }

    #[test]
    fn test_memory_log() {
        let log = MemoryConversationLog::new();

        log.append(&exchange("bye", "Goodbye")).unwrap();

        let records = log.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].chatbot_response, "Goodbye");
    }
}
