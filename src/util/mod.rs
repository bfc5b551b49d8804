//! Utility functions for common operations.
//!
//! Atomic file output, shared by configuration saving and exports so that a
//! failed write never leaves a half-written file behind.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{ChatError, Result};

/// Create a temporary file next to `path`, creating parent directories.
fn temp_file_beside(path: &Path) -> Result<NamedTempFile> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        None => {
            return Err(ChatError::IoError {
                context: format!("Cannot determine parent directory for: {}", path.display()),
                source: io::Error::new(io::ErrorKind::InvalidInput, "No parent directory"),
            })
        }
    };

    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ChatError::io(format!("Failed to create directory: {}", parent.display()), e)
        })?;
    }

    // Same directory keeps the final rename on one filesystem.
    NamedTempFile::new_in(parent).map_err(|e| {
        ChatError::io(
            format!("Failed to create temporary file in: {}", parent.display()),
            e,
        )
    })
}

/// Atomically write content to a file.
///
/// Writes to a temporary file in the same directory, flushes it, then
/// renames it over the target. If any step fails the original file (if it
/// exists) is left unchanged.
///
/// # Example
///
/// ```rust,no_run
/// use chat_wrapped::util::atomic_write;
///
/// atomic_write("config.toml", b"[parser]\nretention_cap = 500\n").unwrap();
/// ```
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let mut atomic = AtomicFile::create(path)?;
    let target = atomic.target_path.clone();
    atomic.writer().write_all(content).map_err(|e| {
        ChatError::io(
            format!("Failed to write to temporary file for: {}", target.display()),
            e,
        )
    })?;
    atomic.finish()
}

/// A file writer that only replaces its target when finished.
///
/// # Example
///
/// ```rust,no_run
/// use chat_wrapped::util::AtomicFile;
/// use std::io::Write;
///
/// let mut atomic = AtomicFile::create("cleaned.txt").unwrap();
/// writeln!(atomic.writer(), "05/01/23, 09:05 - Alice: hello").unwrap();
/// atomic.finish().unwrap();
/// ```
pub struct AtomicFile {
    temp_file: NamedTempFile,
    target_path: PathBuf,
}

impl AtomicFile {
    /// Create a new atomic file writer for the given target path.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self {
            temp_file: temp_file_beside(path)?,
            target_path: path.to_path_buf(),
        })
    }

    /// Get a mutable reference to the underlying writer.
    pub fn writer(&mut self) -> &mut NamedTempFile {
        &mut self.temp_file
    }

    /// Finish the atomic write by flushing and renaming the temp file.
    ///
    /// If this is never called, the temporary file is discarded without
    /// touching the target.
    pub fn finish(mut self) -> Result<()> {
        self.temp_file.flush().map_err(|e| {
            ChatError::io(
                format!("Failed to flush file: {}", self.target_path.display()),
                e,
            )
        })?;

        self.temp_file.persist(&self.target_path).map_err(|e| {
            ChatError::io(
                format!("Failed to atomically write: {}", self.target_path.display()),
                e.error,
            )
        })?;

        Ok(())
    }
}
