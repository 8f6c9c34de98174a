//! Live log handlers
//!
//! The runtime side of logging management:
//!
//! - [`LogHandler`]: a running handler whose level, encoding, formatter and
//!   autoflush can change without a restart
//! - [`ConsoleHandler`] / [`FileHandler`]: concrete handlers
//! - [`PatternFormatter`] and [`FormatterStrategy`]: formatter attribute
//!   interpretation
//! - [`HandlerLookup`] / [`HandlerRegistry`]: finding running handlers by name
//! - [`attributes`]: standard attribute definitions and validators
//! - [`LoggingConfig`]: starting handlers from TOML
//!
//! # Example
//!
//! ```rust
//! use logmgmt_handler::{ConsoleHandler, HandlerLookup, HandlerRegistry, Level, LogHandler};
//!
//! let registry = HandlerRegistry::new();
//! registry.register(ConsoleHandler::new("CONSOLE"));
//!
//! let console = registry.get("CONSOLE").unwrap();
//! console.set_level(Level::WARN);
//! assert_eq!(console.level(), Level::WARN);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod attributes;
mod config;
mod console;
mod encoding;
mod error;
mod file;
mod formatter;
mod handler;
mod level;
mod lookup;
mod record;

// Re-exports
pub use config::{CommonHandlerConfig, ConsoleHandlerConfig, FileHandlerConfig, LoggingConfig};
pub use console::{ConsoleHandler, ConsoleTarget};
pub use encoding::Charset;
pub use error::{
    ConfigError, FormatterError, HandlerError, InvalidLevel, InvalidTarget, UnsupportedEncoding,
};
pub use file::FileHandler;
pub use formatter::{
    FormatterSpec, FormatterStrategy, LogFormatter, PatternFormatter, PatternFormatterStrategy,
    DEFAULT_DATE_FORMAT, DEFAULT_PATTERN, MAX_FIELD_WIDTH,
};
pub use handler::{HandlerCore, LogHandler};
pub use level::Level;
pub use lookup::{HandlerLookup, HandlerRegistry};
pub use record::LogRecord;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
