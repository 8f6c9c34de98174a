//! Console handler

use crate::error::{HandlerError, InvalidTarget};
use crate::handler::{HandlerCore, LogHandler};
use parking_lot::RwLock;
use std::fmt::{self, Display, Formatter};
use std::io::Write;
use std::str::FromStr;

/// Stream a [`ConsoleHandler`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConsoleTarget {
    /// Standard output
    #[default]
    SystemOut,
    /// Standard error
    SystemErr,
}

impl ConsoleTarget {
    /// Accepted attribute values
    pub const NAMES: [&'static str; 2] = ["System.out", "System.err"];

    /// Attribute value for this target
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemOut => "System.out",
            Self::SystemErr => "System.err",
        }
    }
}

impl Display for ConsoleTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsoleTarget {
    type Err = InvalidTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "System.out" => Ok(Self::SystemOut),
            "System.err" => Ok(Self::SystemErr),
            other => Err(InvalidTarget(other.to_string())),
        }
    }
}

/// Handler writing to the process console
#[derive(Debug)]
pub struct ConsoleHandler {
    core: HandlerCore,
    target: RwLock<ConsoleTarget>,
}

impl ConsoleHandler {
    /// Create handler writing to standard output
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_target(name, ConsoleTarget::default())
    }

    /// Create handler writing to `target`
    pub fn with_target(name: impl Into<String>, target: ConsoleTarget) -> Self {
        Self {
            core: HandlerCore::new(name),
            target: RwLock::new(target),
        }
    }

    /// Current target
    #[must_use]
    pub fn target(&self) -> ConsoleTarget {
        *self.target.read()
    }

    /// Switch target; pending output on the old stream is flushed first
    ///
    /// # Errors
    /// Returns [`HandlerError`] if the old stream cannot be flushed.
    pub fn set_target(&self, target: ConsoleTarget) -> Result<(), HandlerError> {
        let mut current = self.target.write();
        if *current != target {
            flush_target(self.name(), *current)?;
            *current = target;
        }
        Ok(())
    }
}

fn flush_target(handler: &str, target: ConsoleTarget) -> Result<(), HandlerError> {
    let result = match target {
        ConsoleTarget::SystemOut => std::io::stdout().lock().flush(),
        ConsoleTarget::SystemErr => std::io::stderr().lock().flush(),
    };
    result.map_err(|e| HandlerError::write(handler, e))
}

impl LogHandler for ConsoleHandler {
    fn core(&self) -> &HandlerCore {
        &self.core
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<(), HandlerError> {
        let result = match *self.target.read() {
            ConsoleTarget::SystemOut => std::io::stdout().lock().write_all(bytes),
            ConsoleTarget::SystemErr => std::io::stderr().lock().write_all(bytes),
        };
        result.map_err(|e| HandlerError::write(self.name(), e))
    }

    fn flush(&self) -> Result<(), HandlerError> {
        flush_target(self.name(), self.target())
    }
}
