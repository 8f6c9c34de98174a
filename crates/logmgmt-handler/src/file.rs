//! File handler

use crate::error::HandlerError;
use crate::handler::{HandlerCore, LogHandler};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Handler writing to a file
///
/// The append flag is read when a file is opened; changing it does not
/// reopen the current file. Relative paths resolve against the base
/// directory when one is set, otherwise against the working directory.
#[derive(Debug)]
pub struct FileHandler {
    core: HandlerCore,
    sink: Mutex<Option<FileSink>>,
    append: AtomicBool,
    base_dir: Option<PathBuf>,
}

impl FileHandler {
    /// Create handler with no file; records are dropped until one is set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: HandlerCore::new(name),
            sink: Mutex::new(None),
            append: AtomicBool::new(true),
            base_dir: None,
        }
    }

    /// Resolve relative file paths against `base_dir`
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Directory relative file paths resolve against
    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Create handler and open `path`
    ///
    /// # Errors
    /// Returns [`HandlerError::Open`] if the file cannot be opened.
    pub fn open(name: impl Into<String>, path: impl AsRef<Path>, append: bool) -> Result<Self, HandlerError> {
        let handler = Self::new(name);
        handler.set_append(append);
        handler.set_file(Some(path.as_ref()))?;
        Ok(handler)
    }

    /// Path of the open file
    #[must_use]
    pub fn file(&self) -> Option<PathBuf> {
        self.sink.lock().as_ref().map(|s| s.path.clone())
    }

    /// Switch to another file, or close output with `None`
    ///
    /// The current file is flushed first and the new one opened after, so
    /// either failure leaves the handler writing where it was and the new
    /// file untouched by a failed flush.
    ///
    /// # Errors
    /// Returns [`HandlerError`] if the old file cannot be flushed or the new
    /// one cannot be opened.
    pub fn set_file(&self, path: Option<&Path>) -> Result<(), HandlerError> {
        let mut sink = self.sink.lock();
        if let Some(old) = sink.as_mut() {
            old.writer
                .flush()
                .map_err(|e| HandlerError::write(self.name(), e))?;
        }
        let next = match path {
            Some(path) => Some(self.open_sink(&self.resolve(path))?),
            None => None,
        };
        *sink = next;
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Whether files are opened for appending
    #[must_use]
    pub fn append(&self) -> bool {
        self.append.load(Ordering::Acquire)
    }

    /// Change the append flag used for the next open
    pub fn set_append(&self, append: bool) {
        self.append.store(append, Ordering::Release);
    }

    fn open_sink(&self, path: &Path) -> Result<FileSink, HandlerError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| HandlerError::open(self.name(), path, e))?;
        }
        let append = self.append();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(|e| HandlerError::open(self.name(), path, e))?;
        tracing::debug!(handler = self.name(), path = %path.display(), append, "opened log file");
        Ok(FileSink {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }
}

impl LogHandler for FileHandler {
    fn core(&self) -> &HandlerCore {
        &self.core
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<(), HandlerError> {
        match self.sink.lock().as_mut() {
            Some(sink) => sink
                .writer
                .write_all(bytes)
                .map_err(|e| HandlerError::write(self.name(), e)),
            None => Ok(()),
        }
    }

    fn flush(&self) -> Result<(), HandlerError> {
        match self.sink.lock().as_mut() {
            Some(sink) => sink
                .writer
                .flush()
                .map_err(|e| HandlerError::write(self.name(), e)),
            None => Ok(()),
        }
    }
}
