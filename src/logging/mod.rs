//! Structured JSON-lines logging for router diagnostics.
//!
//! Every event serializes to a single JSON object so navigation sessions can
//! be replayed or grepped after the fact. Sinks are pluggable: a size-capped
//! file sink for applications, an in-memory sink for tests and demos.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub type LogFields = Map<String, Value>;

pub type LoggingResult<T> = std::result::Result<T, LoggingError>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub ts_ms: u128,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    #[serde(skip_serializing_if = "LogFields::is_empty")]
    pub fields: LogFields,
}

impl LogEvent {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ts_ms: current_ms(),
            level,
            target: target.into(),
            message: message.into(),
            fields: LogFields::new(),
        }
    }

    pub fn with_fields(
        level: LogLevel,
        target: impl Into<String>,
        message: impl Into<String>,
        fields: LogFields,
    ) -> Self {
        Self {
            fields,
            ..Self::new(level, target, message)
        }
    }
}

fn current_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

pub trait LogSink: Send + Sync {
    fn log(&self, event: &LogEvent) -> LoggingResult<()>;
}

/// Cheaply clonable front end over a shared sink.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
}

impl Logger {
    pub fn new<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    pub fn log(&self, level: LogLevel, target: &str, message: &str) -> LoggingResult<()> {
        self.sink.log(&LogEvent::new(level, target, message))
    }

    pub fn log_event(&self, event: LogEvent) -> LoggingResult<()> {
        self.sink.log(&event)
    }
}

/// Append-only sink writing one JSON object per line. When the file would
/// grow past `max_bytes` it is truncated and restarted; zero disables the
/// cap.
pub struct FileSink {
    path: PathBuf,
    max_bytes: u64,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>, max_bytes: u64) -> LoggingResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            max_bytes,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    fn write_line(&self, mut line: String) -> LoggingResult<()> {
        line.push('\n');
        let mut guard = self.writer.lock().expect("file sink mutex poisoned");

        if self.would_overflow(guard.get_ref(), line.len() as u64)? {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path)?;
            *guard = BufWriter::new(file);
        }

        guard.write_all(line.as_bytes())?;
        guard.flush()?;
        Ok(())
    }

    fn would_overflow(&self, file: &File, incoming_len: u64) -> std::io::Result<bool> {
        if self.max_bytes == 0 {
            return Ok(false);
        }
        Ok(file.metadata()?.len() + incoming_len > self.max_bytes)
    }
}

impl LogSink for FileSink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        self.write_line(serde_json::to_string(event)?)
    }
}

/// Captures events in memory so tests and demos can inspect them.
#[derive(Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .expect("memory sink mutex poisoned")
            .clone()
    }
}

impl LogSink for MemorySink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        self.events
            .lock()
            .expect("memory sink mutex poisoned")
            .push(event.clone());
        Ok(())
    }
}

pub fn json_kv(key: &str, value: impl Into<Value>) -> (String, Value) {
    (key.to_string(), value.into())
}

pub fn event_with_fields(
    level: LogLevel,
    target: &str,
    message: &str,
    fields: impl IntoIterator<Item = (String, Value)>,
) -> LogEvent {
    let mut map = LogFields::new();
    for (key, value) in fields {
        map.insert(key, value);
    }
    LogEvent::with_fields(level, target, message, map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_sink_captures_events() {
        let sink = MemorySink::new();
        let logger = Logger::new(sink.clone());
        logger
            .log(LogLevel::Info, "wireframe::test", "hello")
            .unwrap();
        logger
            .log_event(event_with_fields(
                LogLevel::Debug,
                "wireframe::test",
                "with_fields",
                [json_kv("screen", json!("screen#1"))],
            ))
            .unwrap();

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].message, "hello");
        assert_eq!(events[1].fields["screen"], json!("screen#1"));
    }

    #[test]
    fn empty_fields_are_omitted_from_json() {
        let event = LogEvent::new(LogLevel::Warn, "wireframe::test", "bare");
        let line = serde_json::to_string(&event).unwrap();
        assert!(!line.contains("fields"));
        assert!(line.contains("\"level\":\"warn\""));
    }

    #[test]
    fn file_sink_truncates_past_the_cap() {
        let path = std::env::temp_dir().join(format!(
            "wireframe_mvp_log_{}_{}.jsonl",
            std::process::id(),
            current_ms()
        ));
        let sink = FileSink::new(&path, 256).unwrap();
        for idx in 0..50 {
            sink.log(&LogEvent::new(
                LogLevel::Debug,
                "wireframe::test",
                format!("entry {idx}"),
            ))
            .unwrap();
        }
        let len = std::fs::metadata(&path).unwrap().len();
        assert!(len <= 256, "file grew past the cap: {len}");
        let _ = std::fs::remove_file(&path);
    }
}
