//! Severity levels
//!
//! Provides [`Level`], covering the standard names (`SEVERE` .. `FINEST`)
//! and the extended names (`FATAL`, `ERROR`, `WARN`, `DEBUG`, `TRACE`).

use crate::error::InvalidLevel;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Named severity with an integer weight
///
/// Two levels are equal only if both name and value match, so `WARN` and
/// `WARNING` are distinct even though they gate records identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Level {
    name: &'static str,
    value: i32,
}

impl Level {
    /// Disables the handler
    pub const OFF: Level = Level::new("OFF", i32::MAX);
    /// Unrecoverable failure
    pub const FATAL: Level = Level::new("FATAL", 1100);
    /// Serious failure
    pub const SEVERE: Level = Level::new("SEVERE", 1000);
    /// Error
    pub const ERROR: Level = Level::new("ERROR", 1000);
    /// Potential problem
    pub const WARNING: Level = Level::new("WARNING", 900);
    /// Potential problem
    pub const WARN: Level = Level::new("WARN", 900);
    /// Informational
    pub const INFO: Level = Level::new("INFO", 800);
    /// Static configuration messages
    pub const CONFIG: Level = Level::new("CONFIG", 700);
    /// Debug output
    pub const DEBUG: Level = Level::new("DEBUG", 500);
    /// Tracing information
    pub const FINE: Level = Level::new("FINE", 500);
    /// Detailed tracing
    pub const FINER: Level = Level::new("FINER", 400);
    /// Detailed tracing
    pub const TRACE: Level = Level::new("TRACE", 400);
    /// Most detailed tracing
    pub const FINEST: Level = Level::new("FINEST", 300);
    /// Enables everything
    pub const ALL: Level = Level::new("ALL", i32::MIN);

    // Integer lookups return the first entry with a matching value.
    const KNOWN: [Level; 14] = [
        Level::OFF,
        Level::SEVERE,
        Level::WARNING,
        Level::INFO,
        Level::CONFIG,
        Level::FINE,
        Level::FINER,
        Level::FINEST,
        Level::ALL,
        Level::FATAL,
        Level::ERROR,
        Level::WARN,
        Level::DEBUG,
        Level::TRACE,
    ];

    const fn new(name: &'static str, value: i32) -> Self {
        Self { name, value }
    }

    /// Parse a level name (case-insensitive) or integer value
    ///
    /// # Errors
    /// Returns [`InvalidLevel`] if the token names no known level.
    pub fn parse(token: &str) -> Result<Self, InvalidLevel> {
        let trimmed = token.trim();
        let by_name = Self::KNOWN
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(trimmed));
        let found = match by_name {
            Some(level) => Some(*level),
            None => trimmed
                .parse::<i32>()
                .ok()
                .and_then(|value| Self::KNOWN.iter().find(|l| l.value == value).copied()),
        };
        found.ok_or_else(|| InvalidLevel {
            token: token.to_string(),
        })
    }

    /// All named levels
    #[must_use]
    pub fn known() -> &'static [Level] {
        &Self::KNOWN
    }

    /// Canonical upper-case name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Integer weight
    #[inline]
    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Whether a record at `record` passes a threshold of `self`
    #[inline]
    #[must_use]
    pub fn permits(&self, record: Level) -> bool {
        self.value != i32::MAX && record.value >= self.value
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::ALL
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.name.cmp(other.name))
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Level {
    type Err = InvalidLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!(Level::parse("WARNING").unwrap(), Level::WARNING);
        assert_eq!(Level::parse("warn").unwrap(), Level::WARN);
        assert_eq!(Level::parse(" Info ").unwrap(), Level::INFO);
        assert_eq!(Level::parse("ALL").unwrap(), Level::ALL);
    }

    #[test]
    fn parse_values() {
        assert_eq!(Level::parse("900").unwrap(), Level::WARNING);
        assert_eq!(Level::parse("1100").unwrap(), Level::FATAL);
        assert!(Level::parse("901").is_err());
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = Level::parse("LOUD").unwrap_err();
        assert_eq!(err.token, "LOUD");
    }

    #[test]
    fn warn_and_warning_are_distinct() {
        assert_ne!(Level::WARN, Level::WARNING);
        assert_eq!(Level::WARN.value(), Level::WARNING.value());
    }

    #[test]
    fn permits() {
        assert!(Level::INFO.permits(Level::WARN));
        assert!(Level::INFO.permits(Level::INFO));
        assert!(!Level::INFO.permits(Level::DEBUG));
        assert!(Level::ALL.permits(Level::FINEST));
        assert!(!Level::OFF.permits(Level::FATAL));
    }

    #[test]
    fn ordering_follows_value() {
        assert!(Level::DEBUG < Level::INFO);
        assert!(Level::SEVERE < Level::FATAL);
    }
}
