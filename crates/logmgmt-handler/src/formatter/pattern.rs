//! Pattern formatter
//!
//! Supported conversions: `%d` / `%d{chrono format}`, `%p` level, `%c`
//! category, `%t` thread, `%m` / `%s` message, `%e` exception, `%E`
//! exception on its own line, `%n` newline and `%%`. Fields take an optional
//! `-` (left align) and minimum width, e.g. `%-5p`.

use super::LogFormatter;
use crate::error::FormatterError;
use crate::record::LogRecord;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write;

/// Pattern applied when none is configured
pub const DEFAULT_PATTERN: &str = "%d{%H:%M:%S%.3f} %-5p [%c] (%t) %s%E%n";

/// Largest field width a pattern may request
pub const MAX_FIELD_WIDTH: usize = 1024;

/// Date format used by a bare `%d`
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    Date(String),
    Level,
    Category,
    Thread,
    Message,
    Exception,
    ExceptionLine,
    Newline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        field: Field,
        left_align: bool,
        width: usize,
    },
}

/// Formatter driven by a `%`-conversion pattern
///
/// The pattern is parsed once; formatting never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFormatter {
    pattern: String,
    segments: Vec<Segment>,
}

impl PatternFormatter {
    /// Parse a pattern
    ///
    /// # Errors
    /// Returns [`FormatterError`] for unknown conversions, a trailing `%`,
    /// an unclosed `{`, an invalid date format or a width above
    /// [`MAX_FIELD_WIDTH`].
    pub fn new(pattern: impl Into<String>) -> Result<Self, FormatterError> {
        let pattern = pattern.into();
        let segments = parse(&pattern)?;
        Ok(Self { pattern, segments })
    }

    /// Source pattern
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            segments: parse(DEFAULT_PATTERN).unwrap_or_default(),
        }
    }
}

impl LogFormatter for PatternFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field {
                    field: Field::Newline,
                    ..
                } => out.push('\n'),
                Segment::Field {
                    field,
                    left_align,
                    width,
                } => {
                    let value = render(field, record);
                    let width = *width;
                    // Writing to a String only fails if a Display impl does.
                    let _ = if *left_align {
                        write!(out, "{value:<width$}")
                    } else {
                        write!(out, "{value:>width$}")
                    };
                }
            }
        }
        out
    }

    fn pattern(&self) -> Option<&str> {
        Some(&self.pattern)
    }
}

fn render(field: &Field, record: &LogRecord) -> String {
    match field {
        Field::Date(format) => {
            let mut s = String::new();
            let _ = write!(s, "{}", record.timestamp.format(format));
            s
        }
        Field::Level => record.level.name().to_string(),
        Field::Category => record.category.clone(),
        Field::Thread => record.thread.clone().unwrap_or_default(),
        Field::Message => record.message.clone(),
        Field::Exception => record.thrown.clone().unwrap_or_default(),
        Field::ExceptionLine => record
            .thrown
            .as_ref()
            .map(|t| format!("\n{t}"))
            .unwrap_or_default(),
        Field::Newline => "\n".to_string(),
    }
}

fn parse(pattern: &str) -> Result<Vec<Segment>, FormatterError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        let left_align = chars.next_if_eq(&'-').is_some();
        let mut width = 0usize;
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            width = width * 10 + digit as usize;
            if width > MAX_FIELD_WIDTH {
                return Err(FormatterError::WidthTooLarge {
                    pattern: pattern.to_string(),
                    max: MAX_FIELD_WIDTH,
                });
            }
            chars.next();
        }

        let conversion = chars
            .next()
            .ok_or_else(|| FormatterError::DanglingPercent(pattern.to_string()))?;
        let field = match conversion {
            '%' => {
                literal.push('%');
                continue;
            }
            'd' => {
                let format = if chars.next_if_eq(&'{').is_some() {
                    let mut format = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => format.push(ch),
                            None => return Err(FormatterError::UnclosedBrace(pattern.to_string())),
                        }
                    }
                    format
                } else {
                    DEFAULT_DATE_FORMAT.to_string()
                };
                if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
                    return Err(FormatterError::InvalidDateFormat {
                        pattern: pattern.to_string(),
                        format,
                    });
                }
                Field::Date(format)
            }
            'p' => Field::Level,
            'c' => Field::Category,
            't' => Field::Thread,
            'm' | 's' => Field::Message,
            'e' => Field::Exception,
            'E' => Field::ExceptionLine,
            'n' => Field::Newline,
            other => {
                return Err(FormatterError::UnknownConversion {
                    pattern: pattern.to_string(),
                    conversion: other,
                })
            }
        };

        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Field {
            field,
            left_align,
            width,
        });
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}
