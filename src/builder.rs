use std::path::PathBuf;
use std::sync::Arc;

use crate::engine::{run, Scan};
use crate::entry::Entry;
use crate::error::DirmatchError;
use crate::pattern::GlobMatcher;
use crate::results::Results;
use crate::source::DirectorySource;
use crate::traits::{Matcher, Source};

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and running a scan.
///
/// Created via [`dirmatch::search()`](crate::search). Configure with chained
/// builder methods, then call [`scan()`](SearchBuilder::scan) for a lazy
/// iterator or [`run()`](SearchBuilder::run) to collect everything.
///
/// # Example
///
/// ```rust,no_run
/// let results = dirmatch::search()
///     .directory("/var/log")
///     .pattern("*.log")
///     .limit(10)
///     .run()?;
/// # Ok::<(), dirmatch::DirmatchError>(())
/// ```
#[derive(Default)]
pub struct SearchBuilder {
    source:         Option<Box<dyn Source>>,
    matcher:        Option<MatcherChoice>,
    limit:          Option<usize>,
    collect_errors: bool,
}

/// The glob is compiled when the scan starts so that `pattern()` can stay
/// infallible.
enum MatcherChoice {
    Glob(String),
    Custom(Box<dyn Matcher>),
}

impl SearchBuilder {
    // ── Source ────────────────────────────────────────────────────────────

    /// Set the source to scan.
    pub fn source(mut self, s: impl Source + 'static) -> Self {
        self.source = Some(Box::new(s));
        self
    }

    /// Scan the immediate entries of `dir`, `.` and `..` included.
    ///
    /// Equivalent to `.source(DirectorySource::new(dir))`.
    pub fn directory(self, dir: impl Into<PathBuf>) -> Self {
        self.source(DirectorySource::new(dir))
    }

    // ── Matcher ───────────────────────────────────────────────────────────

    /// Report only entries whose name matches the shell glob `pattern`.
    ///
    /// Replaces any matcher set earlier.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.matcher = Some(MatcherChoice::Glob(pattern.into()));
        self
    }

    /// Set a custom matcher. Replaces any pattern set earlier.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(MatcherChoice::Custom(Box::new(m)));
        self
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Stop after `n` matches. The source is released as soon as the n-th
    /// match has been handed out.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Keep recoverable errors in [`Results::errors`].
    ///
    /// Disabled by default. Only affects [`run()`](SearchBuilder::run); the
    /// iterator from [`scan()`](SearchBuilder::scan) always yields them.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Validate the configuration, open the source and return the lazy scan.
    ///
    /// # Errors
    ///
    /// In this order: `InvalidSource` if no source was set, `InvalidPattern`
    /// if the glob does not compile, and whatever the source's `open()`
    /// returns (`DirectoryOpen` for directories). Nothing is visited on
    /// failure.
    pub fn scan(self) -> Result<Scan, DirmatchError> {
        let source = self.source.ok_or(DirmatchError::InvalidSource)?;

        // Default matcher: match everything
        let matcher: Arc<dyn Matcher> = match self.matcher {
            Some(MatcherChoice::Glob(p))   => Arc::new(GlobMatcher::new(&p)?),
            Some(MatcherChoice::Custom(m)) => Arc::from(m),
            None                           => Arc::new(AllMatcher),
        };

        Scan::start(source.as_ref(), matcher, self.limit)
    }

    /// Run the scan to completion and return what it found.
    ///
    /// # Errors
    ///
    /// Same as [`scan()`](SearchBuilder::scan). Errors met after the source
    /// is open end up in [`Results::errors`].
    pub fn run(self) -> Result<Results, DirmatchError> {
        let collect_errors = self.collect_errors;
        Ok(run(self.scan()?, collect_errors))
    }
}

// ---------------------------------------------------------------------------
// Built-in matchers
// ---------------------------------------------------------------------------

/// Matches every entry. Used when no matcher is specified.
struct AllMatcher;

impl Matcher for AllMatcher {
    fn is_match(&self, _entry: &Entry) -> bool {
        true
    }
}
