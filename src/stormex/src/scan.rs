//! Entry-stream scanning.

use std::collections::BTreeSet;

use crate::backend::ArchiveBackend;
use crate::filter::{self, SearchCriteria};
use crate::report::{Event, Report};
use crate::Error;

/// One matched entry, kept past the scan iteration that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub full_path: String,
}

/// Drives a backend's entry stream against a set of criteria.
pub struct Scanner {
    criteria: SearchCriteria,
    progress_every: usize,
}

impl Scanner {
    pub fn new(criteria: SearchCriteria) -> Self {
        Self {
            criteria,
            progress_every: 1000,
        }
    }

    /// Emit a cadence event after every `n` matches. `0` disables cadence
    /// reporting. The interval is approximate; it depends on enumeration
    /// speed.
    pub fn progress_every(mut self, n: usize) -> Self {
        self.progress_every = n;
        self
    }

    /// Walk the backend's entries to exhaustion, collecting matches in
    /// enumeration order.
    ///
    /// Duplicate paths yield duplicate matches; nothing is sorted or
    /// deduplicated. Failing to start enumeration is fatal and surfaces as
    /// [`Error::ArchiveOpen`] before any match is produced.
    pub fn scan(
        &self,
        backend: &dyn ArchiveBackend,
        report: &mut dyn Report,
    ) -> Result<Vec<MatchResult>, Error> {
        let entries = backend.entries().map_err(|source| Error::ArchiveOpen {
            name: backend.name().to_string(),
            source,
        })?;

        let mut matches = Vec::new();
        for entry in entries {
            if !filter::matches(&entry, &self.criteria) {
                continue;
            }

            matches.push(MatchResult {
                full_path: entry.full_path.clone(),
            });
            report.report(Event::MatchFound {
                path: &entry.full_path,
                found: matches.len(),
            });
            if self.progress_every > 0 && matches.len() % self.progress_every == 0 {
                report.report(Event::ScanProgress {
                    found: matches.len(),
                });
            }
        }

        report.report(Event::ScanFinished {
            found: matches.len(),
        });
        Ok(matches)
    }
}

/// Unique directory prefixes of the matches, sorted.
///
/// Each prefix is the match's full path with the filename cut off, trailing
/// separator included. Matches with no directory portion contribute
/// nothing.
pub fn parent_directories(matches: &[MatchResult]) -> BTreeSet<String> {
    matches
        .iter()
        .filter_map(|m| {
            let normalized = m.full_path.replace('\\', "/");
            let cut = normalized.rfind('/')?;
            Some(normalized[..=cut].to_string())
        })
        .collect()
}
