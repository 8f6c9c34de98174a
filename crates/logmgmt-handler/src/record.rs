//! Log records

use crate::level::Level;
use chrono::{DateTime, Utc};

/// A single event offered to a handler
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Severity
    pub level: Level,
    /// Logger category, e.g. `org.example.service`
    pub category: String,
    /// Rendered message
    pub message: String,
    /// Name of the emitting thread
    pub thread: Option<String>,
    /// Rendered exception, if any
    pub thrown: Option<String>,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Create a record stamped with the current time and thread
    pub fn new(level: Level, category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            category: category.into(),
            message: message.into(),
            thread: std::thread::current().name().map(str::to_string),
            thrown: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach a rendered exception
    #[inline]
    #[must_use]
    pub fn with_thrown(mut self, thrown: impl Into<String>) -> Self {
        self.thrown = Some(thrown.into());
        self
    }

    /// Override the thread name
    #[inline]
    #[must_use]
    pub fn with_thread(mut self, thread: impl Into<String>) -> Self {
        self.thread = Some(thread.into());
        self
    }

    /// Override the timestamp
    #[inline]
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
