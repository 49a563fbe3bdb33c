//! This module contains the persistence layer: the dictionary file format and
//! the crash-safe save protocol.
//!
//! A dictionary file is UTF-8 text with one word per line, LF-terminated,
//! written in byte-lexicographic order so diffs stay stable. The shape is
//! compatible with `/usr/share/dict/words`.
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::word::canonicalize;

/// Distinguishes temporary files written by concurrent saves of this process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, thiserror::Error)]
/// The error type for [`load`].
pub enum LoadError {
    /// The file cannot be read due to filesystem permissions.
    #[error("permission denied while reading `{0}`")]
    PermissionDenied(PathBuf),
    /// Reading the file failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// Every non-blank line of the file was malformed.
    #[error("every line of `{0}` is malformed")]
    AllLinesMalformed(PathBuf),
}

#[derive(Debug, thiserror::Error)]
/// The error type for [`save`].
pub enum SaveError {
    /// The file cannot be written due to filesystem permissions.
    #[error("permission denied while writing `{0}`")]
    PermissionDenied(PathBuf),
    /// Writing, flushing or renaming failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// The parsed content of a dictionary file.
#[derive(Debug, Clone, Default)]
pub struct LoadedDictionary {
    /// Every well-formed line, canonicalized. Duplicates are preserved here;
    /// the caller's set collapses them.
    pub words: Vec<Box<str>>,
    /// The number of non-blank lines that failed UTF-8 decoding or word
    /// validation and were skipped.
    pub skipped: usize,
}

fn read_error(path: &Path, error: io::Error) -> LoadError {
    if error.kind() == io::ErrorKind::PermissionDenied {
        LoadError::PermissionDenied(path.to_path_buf())
    } else {
        LoadError::Io {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

fn write_error(path: &Path, error: io::Error) -> SaveError {
    if error.kind() == io::ErrorKind::PermissionDenied {
        SaveError::PermissionDenied(path.to_path_buf())
    } else {
        SaveError::Io {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Appends `suffix` to the file name of `path`, staying in the same
/// directory so renames never cross filesystems.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("dictionary"));
    name.push(suffix);
    path.with_file_name(name)
}

/// Reads and parses a dictionary file.
///
/// A missing file is not an error; it parses as an empty dictionary.
/// Malformed lines are skipped and counted.
///
/// # Errors
///
/// Returns a [`LoadError`] when the file cannot be read, or when it has
/// lines but every one of them is malformed.
pub fn load(path: &Path) -> Result<LoadedDictionary, LoadError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Ok(LoadedDictionary::default())
        }
        Err(error) => return Err(read_error(path, error)),
    };
    let mut words = Vec::new();
    let mut skipped = 0usize;
    let mut nonblank = 0usize;
    for line in bytes.split(|&byte| byte == b'\n') {
        if line.is_empty() {
            continue;
        }
        nonblank += 1;
        let Ok(text) = std::str::from_utf8(line) else {
            skipped += 1;
            continue;
        };
        match canonicalize(text) {
            Ok(word) => words.push(word.into_owned().into_boxed_str()),
            Err(_) => skipped += 1,
        }
    }
    if nonblank > 0 && words.is_empty() {
        return Err(LoadError::AllLinesMalformed(path.to_path_buf()));
    }
    Ok(LoadedDictionary { words, skipped })
}

/// Writes `words` to `path` atomically.
///
/// The content goes to a sibling temporary file first, which is fsynced and
/// renamed over `path`; an existing file is renamed to `<path>.bak` before
/// the swap and the containing directory is fsynced after it. If any step
/// fails before the swap, the temporary file is deleted and the original is
/// untouched, so a crash leaves either the old content or the new content,
/// never a partial write.
///
/// # Errors
///
/// Returns a [`SaveError`] when any filesystem step fails.
pub fn save(path: &Path, words: &[&str]) -> Result<(), SaveError> {
    let temp = sibling(
        path,
        &format!(
            ".tmp.{}.{}",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ),
    );
    match write_and_swap(path, &temp, words) {
        Ok(()) => Ok(()),
        Err(error) => {
            let _ = fs::remove_file(&temp);
            Err(error)
        }
    }
}

fn write_and_swap(path: &Path, temp: &Path, words: &[&str]) -> Result<(), SaveError> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(temp)
        .map_err(|error| write_error(temp, error))?;
    let mut writer = BufWriter::new(file);
    for word in words {
        writer
            .write_all(word.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|error| write_error(temp, error))?;
    }
    writer.flush().map_err(|error| write_error(temp, error))?;
    let file = writer
        .into_inner()
        .map_err(|error| write_error(temp, error.into_error()))?;
    file.sync_all().map_err(|error| write_error(temp, error))?;
    drop(file);
    match fs::rename(path, sibling(path, ".bak")) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(write_error(path, error)),
    }
    fs::rename(temp, path).map_err(|error| write_error(path, error))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            // Not every platform lets a directory be opened; the rename is
            // still atomic without the directory fsync, just not yet durable.
            if let Ok(directory) = File::open(parent) {
                directory
                    .sync_all()
                    .map_err(|error| write_error(path, error))?;
            }
        }
    }
    Ok(())
}
