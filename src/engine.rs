use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace};

use crate::entry::Entry;
use crate::error::DirmatchError;
use crate::results::{Results, ScanStats};
use crate::traits::{EntryStream, Matcher, Source};

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// A running scan: a lazy, single-pass sequence of matching entries.
///
/// Each call to `next()` pulls entries from the open source until one
/// matches or the source runs dry. The source is dropped, releasing its
/// handle, as soon as it is exhausted or the match that reaches the limit
/// has been pulled. Dropping a `Scan` early releases it as well.
///
/// Read failures from the source are yielded as `Err` items and do not end
/// the scan by themselves.
pub struct Scan {
    entries: Option<EntryStream>,
    matcher: Arc<dyn Matcher>,
    limit:   Option<usize>,
    visited: usize,
    matches: usize,
    started: Instant,
}

impl Scan {
    /// Open `source` and start a scan. Fails before any entry is visited.
    pub(crate) fn start(
        source: &dyn Source,
        matcher: Arc<dyn Matcher>,
        limit: Option<usize>,
    ) -> Result<Self, DirmatchError> {
        let started = Instant::now();
        let entries = source.open()?;

        Ok(Self {
            entries: Some(entries),
            matcher,
            limit,
            visited: 0,
            matches: 0,
            started,
        })
    }

    /// Entries looked at so far, matched or not.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Entries yielded so far.
    pub fn matches(&self) -> usize {
        self.matches
    }

    /// `true` once the source has been released.
    pub fn is_finished(&self) -> bool {
        self.entries.is_none()
    }

    fn finish(&mut self) {
        if self.entries.take().is_some() {
            debug!(
                visited = self.visited,
                matches = self.matches,
                "scan finished"
            );
        }
    }

    fn at_limit(&self) -> bool {
        self.limit.is_some_and(|lim| self.matches >= lim)
    }
}

impl Iterator for Scan {
    type Item = Result<Entry, DirmatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.at_limit() {
                self.finish();
                return None;
            }

            let entries = self.entries.as_mut()?;
            match entries.next() {
                None => {
                    self.finish();
                    return None;
                }
                Some(Err(e)) => return Some(Err(e)),
                Some(Ok(entry)) => {
                    self.visited += 1;
                    trace!(name = ?entry.name, "visiting entry");

                    if self.matcher.is_match(&entry) {
                        self.matches += 1;
                        if self.at_limit() {
                            self.finish();
                        }
                        return Some(Ok(entry));
                    }
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Scan {}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Drive `scan` to completion and collect what it produced.
///
/// Recoverable errors are kept only when `collect_errors` is set. A fatal
/// error from a custom source ends the run early; what was gathered up to
/// that point is returned with the error recorded.
pub(crate) fn run(mut scan: Scan, collect_errors: bool) -> Results {
    let mut entries = Vec::new();
    let mut errors  = Vec::new();

    for item in scan.by_ref() {
        match item {
            Ok(entry) => entries.push(entry),
            Err(e) if e.is_recoverable() => {
                if collect_errors {
                    errors.push(e);
                }
            }
            Err(e) => {
                errors.push(e);
                break;
            }
        }
    }
    scan.finish();

    Results {
        matches: entries.len(),
        entries,
        stats: ScanStats {
            visited:  scan.visited,
            duration: scan.started.elapsed(),
        },
        errors,
    }
}
