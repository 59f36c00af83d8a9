use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::entry::Entry;
use crate::error::DirmatchError;
use crate::traits::{EntryStream, Source};

// ---------------------------------------------------------------------------
// DirectorySource
// ---------------------------------------------------------------------------

/// Lists the immediate entries of one directory on the local filesystem.
///
/// Like POSIX `readdir`, the self (`.`) and parent (`..`) entries are
/// reported first. `std::fs::read_dir` never returns them, so they are
/// produced here. Turn this off with [`DirectorySource::dot_entries`].
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir:         PathBuf,
    dot_entries: bool,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir:         dir.into(),
            dot_entries: true,
        }
    }

    /// Whether `.` and `..` are reported. Enabled by default.
    pub fn dot_entries(mut self, yes: bool) -> Self {
        self.dot_entries = yes;
        self
    }
}

impl Source for DirectorySource {
    fn open(&self) -> Result<EntryStream, DirmatchError> {
        let handle = DirectoryHandle::open(&self.dir, self.dot_entries)?;
        Ok(Box::new(handle))
    }
}

// ---------------------------------------------------------------------------
// DirectoryHandle
// ---------------------------------------------------------------------------

/// An open directory stream, owned by exactly one scan.
///
/// The OS handle is released once: when the stream is exhausted, after a
/// read error, or when the handle is dropped, whichever happens first.
pub struct DirectoryHandle {
    dir:    PathBuf,
    dots:   std::vec::IntoIter<&'static str>,
    stream: Option<fs::ReadDir>,
}

impl DirectoryHandle {
    /// Open `dir` for listing.
    ///
    /// # Errors
    ///
    /// [`DirmatchError::DirectoryOpen`] if `dir` does not exist, is not a
    /// directory, or is not readable by the caller.
    pub fn open(dir: &Path, dot_entries: bool) -> Result<Self, DirmatchError> {
        let stream = fs::read_dir(dir).map_err(|source| DirmatchError::DirectoryOpen {
            path: dir.to_path_buf(),
            source,
        })?;
        debug!(dir = %dir.display(), "opened directory");

        let dots = if dot_entries { vec![".", ".."] } else { Vec::new() };

        Ok(Self {
            dir:    dir.to_path_buf(),
            dots:   dots.into_iter(),
            stream: Some(stream),
        })
    }

    pub fn is_open(&self) -> bool {
        self.stream.is_some()
    }

    fn close(&mut self) {
        if self.stream.take().is_some() {
            trace!(dir = %self.dir.display(), "released directory handle");
        }
    }
}

impl Iterator for DirectoryHandle {
    type Item = Result<Entry, DirmatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        let stream = self.stream.as_mut()?;

        if let Some(dot) = self.dots.next() {
            return Some(Ok(Entry::new(&self.dir, dot)));
        }

        match stream.next() {
            Some(Ok(e)) => Some(Ok(Entry {
                path: e.path(),
                name: e.file_name(),
            })),
            Some(Err(source)) => {
                // The OS stream is not resumable after a failed read.
                self.close();
                Some(Err(DirmatchError::ReadEntry {
                    path: self.dir.clone(),
                    source,
                }))
            }
            None => {
                self.close();
                None
            }
        }
    }
}

impl std::iter::FusedIterator for DirectoryHandle {}

impl Drop for DirectoryHandle {
    fn drop(&mut self) {
        self.close();
    }
}
