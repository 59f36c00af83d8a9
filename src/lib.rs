//! # dirmatch
//!
//! List the entries of one directory whose names match a shell glob.
//!
//! The scan opens the directory once, visits every entry exactly once
//! (including `.` and `..`, as `readdir` reports them), tests each name
//! against the pattern and hands matches out lazily. The directory handle is
//! released when the scan ends, however it ends.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! for entry in dirmatch::scan("/tmp/a", "*.txt")? {
//!     let entry = entry?;
//!     println!("{}", entry.path.display());
//! }
//! # Ok::<(), dirmatch::DirmatchError>(())
//! ```
//!
//! # Custom Sources and Matchers
//!
//! The scan works over the [`Source`] and [`Matcher`] traits, so it can
//! filter anything that has names:
//!
//! ```rust
//! use std::path::Path;
//! use dirmatch::{DirmatchError, Entry, EntryStream, Source};
//!
//! struct NameSource(Vec<&'static str>);
//!
//! impl Source for NameSource {
//!     fn open(&self) -> Result<EntryStream, DirmatchError> {
//!         let entries = self.0.iter()
//!             .map(|name| Ok(Entry::new(Path::new("mem"), *name)))
//!             .collect::<Vec<_>>();
//!         Ok(Box::new(entries.into_iter()))
//!     }
//! }
//!
//! let results = dirmatch::search()
//!     .source(NameSource(vec!["invoice_jan.txt", "invoice_feb.txt", "report.md"]))
//!     .pattern("invoice_*")
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(results.matches, 2);
//! ```

#![forbid(unsafe_code)]

mod builder;
mod engine;
mod entry;
mod error;
mod pattern;
mod results;
mod source;
mod traits;

use std::path::Path;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SearchBuilder;
pub use engine::Scan;
pub use entry::Entry;
pub use error::DirmatchError;
pub use pattern::GlobMatcher;
pub use results::{Results, ScanStats};
pub use source::{DirectoryHandle, DirectorySource};
pub use traits::{EntryStream, Matcher, Source};

// ── Entry points ──────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and run a scan.
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}

/// Lazily list the entries of `directory` whose names match `pattern`.
///
/// # Errors
///
/// [`DirmatchError::DirectoryOpen`] if `directory` cannot be opened as a
/// directory. This is reported before any entry is visited.
///
/// # Example
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("foo.txt"), "").unwrap();
/// std::fs::write(dir.path().join("note.md"), "").unwrap();
///
/// let names: Vec<_> = dirmatch::scan(dir.path(), "*.txt")
///     .unwrap()
///     .map(|e| e.unwrap().name)
///     .collect();
///
/// assert_eq!(names, ["foo.txt"]);
/// ```
pub fn scan(directory: impl AsRef<Path>, pattern: &str) -> Result<Scan, DirmatchError> {
    search()
        .directory(directory.as_ref())
        .pattern(pattern)
        .scan()
}
