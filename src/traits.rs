use crate::entry::Entry;
use crate::error::DirmatchError;

/// The stream of entries a [`Source`] hands out once it is open.
///
/// Dropping the stream releases whatever the source holds open.
pub type EntryStream = Box<dyn Iterator<Item = Result<Entry, DirmatchError>>>;

/// Something that can be opened and then yields entries one at a time.
///
/// [`DirectorySource`](crate::DirectorySource) is the filesystem
/// implementation. Tests and embedders can implement this over anything
/// that has names.
///
/// # Opening
///
/// `open()` is where fatal problems surface: a directory that does not exist,
/// is not a directory, or cannot be read. It must fail before any entry is
/// produced.
///
/// # Error Handling
///
/// Problems reading an individual entry after a successful open are yielded
/// as `Err` items. The scan reports them and keeps going until the stream
/// ends.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use dirmatch::{DirmatchError, Entry, EntryStream, Source};
///
/// struct NameSource(Vec<&'static str>);
///
/// impl Source for NameSource {
///     fn open(&self) -> Result<EntryStream, DirmatchError> {
///         let entries = self.0.iter()
///             .map(|name| Ok(Entry::new(Path::new("mem"), *name)))
///             .collect::<Vec<_>>();
///         Ok(Box::new(entries.into_iter()))
///     }
/// }
/// ```
pub trait Source: Send + Sync {
    /// Acquire the underlying resource and return its entry stream.
    fn open(&self) -> Result<EntryStream, DirmatchError>;
}

/// Determines whether an entry is a match.
///
/// [`GlobMatcher`](crate::GlobMatcher) is the shell-glob implementation.
///
/// # Example
///
/// ```rust
/// use dirmatch::{Entry, Matcher};
///
/// struct ExtensionMatcher(String);
///
/// impl Matcher for ExtensionMatcher {
///     fn is_match(&self, entry: &Entry) -> bool {
///         entry.path
///             .extension()
///             .map(|e| e.eq_ignore_ascii_case(&self.0))
///             .unwrap_or(false)
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if this entry should be reported.
    fn is_match(&self, entry: &Entry) -> bool;
}
