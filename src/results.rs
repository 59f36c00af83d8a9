use std::time::Duration;

use crate::entry::Entry;
use crate::error::DirmatchError;

/// The output of a scan that was run to completion.
pub struct Results {
    /// Number of entries that matched.
    pub matches: usize,

    /// Matched entries, in the order the source produced them.
    pub entries: Vec<Entry>,

    /// Scan statistics.
    pub stats: ScanStats,

    /// Errors met while scanning. Recoverable ones are only kept if
    /// `.collect_errors(true)` was set on the builder.
    /// Use [`DirmatchError::is_recoverable`] to tell them apart.
    pub errors: Vec<DirmatchError>,
}

impl Results {
    /// Matched names, lossily converted for display.
    pub fn names(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.name.to_string_lossy().into_owned())
            .collect()
    }
}

/// Statistics for a completed scan.
pub struct ScanStats {
    /// Entries looked at, matched or not.
    pub visited: usize,

    /// Wall-clock time from opening the source to releasing it.
    pub duration: Duration,
}
