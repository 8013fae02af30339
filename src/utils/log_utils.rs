//! Logging utilities for the application

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Log levels for controlling verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Failures, always displayed
    Error,
    /// Recoverable problems, always displayed
    Warn,
    /// Normal execution, no verbose flag
    Normal,
    /// Info level, verbosity 1
    Info,
    /// Debug level, verbosity 2
    Debug,
}

impl LogLevel {
    /// Minimum verbosity at which a message of this level is emitted
    pub fn required_verbosity(self) -> u8 {
        match self {
            LogLevel::Error | LogLevel::Warn | LogLevel::Normal => 0,
            LogLevel::Info => 1,
            LogLevel::Debug => 2,
        }
    }
}

/// Destination for log lines that passed the verbosity filter.
pub trait LogSink: Send + Sync {
    fn write(&self, level: LogLevel, msg: &str);
}

/// Prints to the terminal: errors and warnings to stderr, everything else to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, level: LogLevel, msg: &str) {
        match level {
            LogLevel::Error => eprintln!("error: {msg}"),
            LogLevel::Warn => eprintln!("warn: {msg}"),
            LogLevel::Normal => println!("{msg}"),
            LogLevel::Info => println!("info: {msg}"),
            LogLevel::Debug => println!("dbg: {msg}"),
        }
    }
}

/// Keeps every line in memory so tests can assert on what was logged.
#[derive(Clone, Default)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl LogSink for RecordingSink {
    fn write(&self, level: LogLevel, msg: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, msg.to_string()));
    }
}

impl RecordingSink {
    pub fn logs(&self) -> Vec<(LogLevel, String)> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages recorded at exactly `level`
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.logs()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

/// Logger for application messages
#[derive(Clone)]
pub struct Logger {
    /// Current verbosity level
    verbosity: u8,
    sink: Arc<dyn LogSink>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("verbosity", &self.verbosity)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a new console logger with the specified verbosity
    pub fn new(verbosity: u8) -> Self {
        Self::with_sink(verbosity, Arc::new(ConsoleSink))
    }

    /// Create a logger that writes into `sink`
    pub fn with_sink(verbosity: u8, sink: Arc<dyn LogSink>) -> Self {
        Self { verbosity, sink }
    }

    /// Log a message if the current verbosity level is at least the one `level` requires
    pub fn log(&self, msg: &str, level: LogLevel) {
        if self.verbosity >= level.required_verbosity() {
            self.sink.write(level, msg);
        }
    }

    /// Log at normal level (always displayed)
    pub fn normal(&self, msg: &str) {
        self.log(msg, LogLevel::Normal);
    }

    /// Log at info level (verbose >= 1)
    pub fn info(&self, msg: &str) {
        self.log(msg, LogLevel::Info);
    }

    /// Log at debug level (verbose >= 2)
    pub fn debug(&self, msg: &str) {
        self.log(msg, LogLevel::Debug);
    }

    pub fn warn(&self, msg: &str) {
        self.log(msg, LogLevel::Warn);
    }

    pub fn error(&self, msg: &str) {
        self.log(msg, LogLevel::Error);
    }

    /// Get current verbosity level
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }
}
