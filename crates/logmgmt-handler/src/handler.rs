//! The live handler capability
//!
//! [`LogHandler`] is what a write coordinator mutates at runtime. Concrete
//! handlers hold a [`HandlerCore`] for the state every handler shares and
//! provide only their output sink.

use crate::encoding::Charset;
use crate::error::{HandlerError, UnsupportedEncoding};
use crate::formatter::{LogFormatter, PatternFormatter};
use crate::level::Level;
use crate::record::LogRecord;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// State shared by every handler: name, level, encoding, formatter, autoflush
///
/// Each property is guarded independently so concurrent writes to different
/// attributes never observe each other half-done.
pub struct HandlerCore {
    name: String,
    level: RwLock<Level>,
    encoding: RwLock<Option<Charset>>,
    formatter: RwLock<Arc<dyn LogFormatter>>,
    autoflush: AtomicBool,
}

impl HandlerCore {
    /// Create core with level `ALL`, default encoding, default pattern and autoflush on
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(Level::ALL),
            encoding: RwLock::new(None),
            formatter: RwLock::new(Arc::new(PatternFormatter::default())),
            autoflush: AtomicBool::new(true),
        }
    }

    /// Handler name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for HandlerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerCore")
            .field("name", &self.name)
            .field("level", &*self.level.read())
            .field("encoding", &*self.encoding.read())
            .field("formatter", &self.formatter.read().pattern())
            .field("autoflush", &self.autoflush.load(Ordering::Relaxed))
            .finish()
    }
}

/// A running log handler whose properties can change live
pub trait LogHandler: Send + Sync {
    /// Shared handler state
    fn core(&self) -> &HandlerCore;

    /// Write already encoded bytes to the output
    ///
    /// # Errors
    /// Returns [`HandlerError`] if the output rejects the write.
    fn write_bytes(&self, bytes: &[u8]) -> Result<(), HandlerError>;

    /// Flush buffered output
    ///
    /// # Errors
    /// Returns [`HandlerError`] if the output cannot be flushed.
    fn flush(&self) -> Result<(), HandlerError>;

    /// Handler name
    fn name(&self) -> &str {
        self.core().name()
    }

    /// Current threshold level
    fn level(&self) -> Level {
        *self.core().level.read()
    }

    /// Change the threshold level
    fn set_level(&self, level: Level) {
        *self.core().level.write() = level;
    }

    /// Explicitly configured encoding; `None` means the platform default
    fn encoding(&self) -> Option<Charset> {
        *self.core().encoding.read()
    }

    /// Change the encoding; `None` restores the platform default
    ///
    /// The name is checked before anything is changed.
    ///
    /// # Errors
    /// Returns [`UnsupportedEncoding`] and leaves the encoding untouched if
    /// the name is not supported.
    fn set_encoding(&self, name: Option<&str>) -> Result<(), UnsupportedEncoding> {
        let charset = name.map(Charset::for_name).transpose()?;
        *self.core().encoding.write() = charset;
        Ok(())
    }

    /// Current formatter
    fn formatter(&self) -> Arc<dyn LogFormatter> {
        Arc::clone(&self.core().formatter.read())
    }

    /// Replace the formatter
    fn set_formatter(&self, formatter: Arc<dyn LogFormatter>) {
        *self.core().formatter.write() = formatter;
    }

    /// Whether output is flushed after each record
    fn autoflush(&self) -> bool {
        self.core().autoflush.load(Ordering::Acquire)
    }

    /// Change autoflush
    fn set_autoflush(&self, autoflush: bool) {
        self.core().autoflush.store(autoflush, Ordering::Release);
    }

    /// Whether a record passes the level threshold
    fn is_loggable(&self, record: &LogRecord) -> bool {
        self.level().permits(record.level)
    }

    /// Format, encode and write a record
    ///
    /// # Errors
    /// Returns [`HandlerError`] if writing or flushing fails.
    fn publish(&self, record: &LogRecord) -> Result<(), HandlerError> {
        if !self.is_loggable(record) {
            return Ok(());
        }
        let text = self.formatter().format(record);
        let bytes = self.encoding().unwrap_or_default().encode(&text);
        self.write_bytes(&bytes)?;
        if self.autoflush() {
            self.flush()?;
        }
        Ok(())
    }
}
