use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirmatchError {
    // Open
    #[error("cannot open directory `{}`", path.display())]
    DirectoryOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no source provided")]
    InvalidSource,

    // Config. Shell globs are rewritten before compiling, so this only
    // fires for input the rewrite cannot turn into a valid `glob` pattern.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // Traversal
    #[error("failed to read an entry of `{}`", path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Third-party extensibility
    #[error("source error: {0}")]
    Source(String),
}

impl DirmatchError {
    /// The directory this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::DirectoryOpen { path, .. } | Self::ReadEntry { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether the scan can still produce a result after this error.
    ///
    /// A failed entry read is reported and the scan ends normally. Everything
    /// else happens before the first entry is visited and halts the scan.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ReadEntry { .. })
    }
}
