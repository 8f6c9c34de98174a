//! Record formatters
//!
//! - [`LogFormatter`]: renders a [`LogRecord`] to text
//! - [`PatternFormatter`]: `%`-conversion pattern formatter
//! - [`FormatterStrategy`]: turns a formatter attribute value into a
//!   [`FormatterSpec`] that can be applied to a live handler

mod pattern;
mod strategy;

pub use pattern::{PatternFormatter, DEFAULT_DATE_FORMAT, DEFAULT_PATTERN, MAX_FIELD_WIDTH};
pub use strategy::{FormatterSpec, FormatterStrategy, PatternFormatterStrategy};

use crate::record::LogRecord;
use std::fmt;

/// Renders records to text
pub trait LogFormatter: Send + Sync + fmt::Debug {
    /// Format one record
    fn format(&self, record: &LogRecord) -> String;

    /// Source pattern, for formatters built from one
    fn pattern(&self) -> Option<&str> {
        None
    }
}
