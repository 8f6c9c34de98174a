//! Handler configuration
//!
//! Handlers can be described in TOML and started from that description:
//!
//! ```toml
//! [[console-handler]]
//! name = "CONSOLE"
//! level = "INFO"
//! target = "System.err"
//!
//! [[file-handler]]
//! name = "FILE"
//! path = "log/server.log"
//! append = false
//! formatter = "%d %-5p [%c] %s%E%n"
//! ```

use crate::console::{ConsoleHandler, ConsoleTarget};
use crate::error::ConfigError;
use crate::file::FileHandler;
use crate::formatter::PatternFormatter;
use crate::handler::LogHandler;
use crate::level::Level;
use crate::lookup::HandlerRegistry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Settings shared by every handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommonHandlerConfig {
    /// Handler name, used for runtime lookup
    pub name: String,
    /// Threshold level name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Encoding name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Formatter pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
    /// Flush after each record
    #[serde(default = "default_true")]
    pub autoflush: bool,
}

impl CommonHandlerConfig {
    /// Create settings with defaults for a named handler
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
            encoding: None,
            formatter: None,
            autoflush: true,
        }
    }

    /// With level
    #[inline]
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// With encoding
    #[inline]
    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    /// With formatter pattern
    #[inline]
    #[must_use]
    pub fn with_formatter(mut self, pattern: impl Into<String>) -> Self {
        self.formatter = Some(pattern.into());
        self
    }

    fn configure(&self, handler: &dyn LogHandler) -> Result<(), ConfigError> {
        if let Some(level) = &self.level {
            let level = Level::parse(level).map_err(|source| ConfigError::Level {
                handler: self.name.clone(),
                source,
            })?;
            handler.set_level(level);
        }
        handler
            .set_encoding(self.encoding.as_deref())
            .map_err(|source| ConfigError::Encoding {
                handler: self.name.clone(),
                source,
            })?;
        if let Some(pattern) = &self.formatter {
            let formatter = PatternFormatter::new(pattern.as_str()).map_err(|source| ConfigError::Formatter {
                handler: self.name.clone(),
                source,
            })?;
            handler.set_formatter(Arc::new(formatter));
        }
        handler.set_autoflush(self.autoflush);
        Ok(())
    }
}

/// Console handler settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleHandlerConfig {
    /// Shared settings
    #[serde(flatten)]
    pub common: CommonHandlerConfig,
    /// `System.out` or `System.err`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ConsoleHandlerConfig {
    /// Create settings for a named console handler
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            common: CommonHandlerConfig::new(name),
            target: None,
        }
    }

    /// Start the handler
    ///
    /// # Errors
    /// Returns [`ConfigError`] for invalid level, encoding, formatter or target.
    pub fn build(&self) -> Result<ConsoleHandler, ConfigError> {
        let target = match &self.target {
            Some(target) => target.parse::<ConsoleTarget>().map_err(|source| ConfigError::Target {
                handler: self.common.name.clone(),
                source,
            })?,
            None => ConsoleTarget::default(),
        };
        let handler = ConsoleHandler::with_target(self.common.name.as_str(), target);
        self.common.configure(&handler)?;
        Ok(handler)
    }
}

/// File handler settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileHandlerConfig {
    /// Shared settings
    #[serde(flatten)]
    pub common: CommonHandlerConfig,
    /// Output file; relative paths resolve against the configured base directory
    pub path: PathBuf,
    /// Append to an existing file
    #[serde(default = "default_true")]
    pub append: bool,
}

impl FileHandlerConfig {
    /// Create settings for a named file handler
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            common: CommonHandlerConfig::new(name),
            path: path.into(),
            append: true,
        }
    }

    /// Start the handler, resolving a relative path against `base_dir`
    ///
    /// # Errors
    /// Returns [`ConfigError`] for invalid settings or if the file cannot be opened.
    pub fn build(&self, base_dir: &Path) -> Result<FileHandler, ConfigError> {
        let handler = FileHandler::new(self.common.name.as_str()).with_base_dir(base_dir);
        self.common.configure(&handler)?;
        handler.set_append(self.append);
        handler.set_file(Some(self.path.as_path()))?;
        Ok(handler)
    }
}

/// All configured handlers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Console handlers
    #[serde(default)]
    pub console_handler: Vec<ConsoleHandlerConfig>,
    /// File handlers
    #[serde(default)]
    pub file_handler: Vec<FileHandlerConfig>,
    /// Base directory for relative file paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl LoggingConfig {
    /// Create empty configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed input.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    /// With console handler
    #[inline]
    #[must_use]
    pub fn with_console_handler(mut self, handler: ConsoleHandlerConfig) -> Self {
        self.console_handler.push(handler);
        self
    }

    /// With file handler
    #[inline]
    #[must_use]
    pub fn with_file_handler(mut self, handler: FileHandlerConfig) -> Self {
        self.file_handler.push(handler);
        self
    }

    /// With base directory for relative file paths
    #[inline]
    #[must_use]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Start every configured handler and register it
    ///
    /// Handlers are started in declaration order; the first failure stops
    /// the installation and leaves already registered handlers running.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] encountered.
    pub fn install(
        &self,
        consoles: &HandlerRegistry<ConsoleHandler>,
        files: &HandlerRegistry<FileHandler>,
    ) -> Result<(), ConfigError> {
        for config in &self.console_handler {
            consoles.register(config.build()?);
        }
        let base_dir = self.log_dir.as_deref().unwrap_or_else(|| Path::new("."));
        for config in &self.file_handler {
            files.register(config.build(base_dir)?);
        }
        tracing::info!(
            console = self.console_handler.len(),
            file = self.file_handler.len(),
            "installed configured handlers"
        );
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Charset;
    use crate::lookup::HandlerLookup;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
        [[console-handler]]
        name = "CONSOLE"
        level = "INFO"
        target = "System.err"

        [[file-handler]]
        name = "FILE"
        path = "server.log"
        append = false
        encoding = "ISO-8859-1"
        formatter = "%p %m%n"
        autoflush = false
    "#;

    #[test]
    fn parse_sample() {
        let config = LoggingConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(
            config.console_handler,
            vec![ConsoleHandlerConfig {
                common: CommonHandlerConfig::new("CONSOLE").with_level("INFO"),
                target: Some("System.err".into()),
            }]
        );
        let file = &config.file_handler[0];
        assert_eq!(file.path, PathBuf::from("server.log"));
        assert!(!file.append);
        assert!(!file.common.autoflush);
    }

    #[test]
    fn parse_rejects_unknown_shape() {
        assert!(matches!(
            LoggingConfig::from_toml_str("console-handler = 5"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn build_console() {
        let handler = ConsoleHandlerConfig::new("CONSOLE").build().unwrap();
        assert_eq!(handler.level(), Level::ALL);
        assert_eq!(handler.target(), ConsoleTarget::SystemOut);
    }

    #[test]
    fn build_rejects_bad_values() {
        let mut config = ConsoleHandlerConfig::new("CONSOLE");
        config.common.level = Some("LOUD".into());
        assert!(matches!(config.build(), Err(ConfigError::Level { .. })));

        let mut config = ConsoleHandlerConfig::new("CONSOLE");
        config.target = Some("System.in".into());
        assert!(matches!(config.build(), Err(ConfigError::Target { .. })));

        let config = ConsoleHandlerConfig {
            common: CommonHandlerConfig::new("CONSOLE").with_encoding("klingon"),
            target: None,
        };
        assert!(matches!(config.build(), Err(ConfigError::Encoding { .. })));
    }

    #[test]
    fn install_registers_handlers() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig::from_toml_str(SAMPLE)
            .unwrap()
            .with_log_dir(dir.path());
        let consoles = HandlerRegistry::new();
        let files = HandlerRegistry::new();
        config.install(&consoles, &files).unwrap();

        let console = consoles.get("CONSOLE").unwrap();
        assert_eq!(console.level(), Level::INFO);
        assert_eq!(console.target(), ConsoleTarget::SystemErr);

        let file = files.get("FILE").unwrap();
        assert_eq!(file.encoding(), Some(Charset::Iso8859_1));
        assert_eq!(file.file(), Some(dir.path().join("server.log")));
        assert!(!file.append());
        assert!(!file.autoflush());
        assert_eq!(file.formatter().pattern(), Some("%p %m%n"));
    }
}
