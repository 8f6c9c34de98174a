//! Error types for log handlers
//!
//! Provides error handling for:
//! - Level and encoding parsing
//! - Formatter pattern parsing
//! - Handler output failures
//! - Handler configuration loading

use std::path::PathBuf;

/// Token is not a recognised level name or value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised level '{token}'")]
pub struct InvalidLevel {
    /// Rejected token
    pub token: String,
}

/// Encoding name is not supported
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported encoding '{name}'")]
pub struct UnsupportedEncoding {
    /// Rejected encoding name
    pub name: String,
}

/// Console target is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown console target '{0}'")]
pub struct InvalidTarget(pub String);

/// Malformed formatter pattern
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatterError {
    /// Unknown `%x` conversion
    #[error("unknown conversion '%{conversion}' in pattern '{pattern}'")]
    UnknownConversion { pattern: String, conversion: char },

    /// Pattern ends with a bare `%`
    #[error("pattern '{0}' ends with an incomplete conversion")]
    DanglingPercent(String),

    /// `{` without a matching `}`
    #[error("unclosed '{{' in pattern '{0}'")]
    UnclosedBrace(String),

    /// Date format not understood
    #[error("invalid date format '{format}' in pattern '{pattern}'")]
    InvalidDateFormat { pattern: String, format: String },

    /// Field width above [`MAX_FIELD_WIDTH`](crate::MAX_FIELD_WIDTH)
    #[error("field width in pattern '{pattern}' exceeds {max}")]
    WidthTooLarge { pattern: String, max: usize },
}

/// Handler output failure
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Writing or flushing failed
    #[error("handler '{handler}' failed to write: {source}")]
    Write {
        handler: String,
        #[source]
        source: std::io::Error,
    },

    /// Opening the output file failed
    #[error("handler '{handler}' failed to open {path}: {source}")]
    Open {
        handler: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HandlerError {
    /// Create write error for handler
    pub fn write(handler: impl Into<String>, source: std::io::Error) -> Self {
        Self::Write {
            handler: handler.into(),
            source,
        }
    }

    /// Create open error for handler and path
    pub fn open(handler: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            handler: handler.into(),
            path: path.into(),
            source,
        }
    }
}

/// Handler configuration could not be loaded or applied
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML syntax or shape error
    #[error("invalid logging configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Reading the configuration file failed
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad level for a handler
    #[error("handler '{handler}': {source}")]
    Level {
        handler: String,
        #[source]
        source: InvalidLevel,
    },

    /// Bad encoding for a handler
    #[error("handler '{handler}': {source}")]
    Encoding {
        handler: String,
        #[source]
        source: UnsupportedEncoding,
    },

    /// Bad formatter pattern for a handler
    #[error("handler '{handler}': {source}")]
    Formatter {
        handler: String,
        #[source]
        source: FormatterError,
    },

    /// Bad console target
    #[error("handler '{handler}': {source}")]
    Target {
        handler: String,
        #[source]
        source: InvalidTarget,
    },

    /// Output could not be opened
    #[error(transparent)]
    Handler(#[from] HandlerError),
}
