use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A single item produced by a [`Source`](crate::traits::Source) while a scan
/// is running.
///
/// Only the name is looked at. No `stat()` is issued for entries, so type,
/// size and timestamps are not available here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The directory joined with `name`.
    pub path: PathBuf,

    /// The entry's name as the OS reported it. Not guaranteed to be UTF-8.
    pub name: OsString,
}

impl Entry {
    /// Build an entry for `name` inside `dir`.
    pub fn new(dir: &Path, name: impl Into<OsString>) -> Self {
        let name = name.into();
        Self {
            path: dir.join(&name),
            name,
        }
    }

    /// The name as `&str`, or `None` if it is not valid UTF-8.
    pub fn name_str(&self) -> Option<&str> {
        self.name.to_str()
    }
}
