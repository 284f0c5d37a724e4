//! Streaming extraction of matched entries.

use std::fs::File;
use std::io::{ErrorKind, Read, Write};

use crate::backend::ArchiveBackend;
use crate::plan::{self, PlanConfig};
use crate::report::{Event, Report};
use crate::scan::MatchResult;
use crate::Error;

/// Streaming chunk size used when the caller does not override it.
pub const DEFAULT_CHUNK_SIZE: usize = 0x10_0000; // 1 MiB

/// Extraction configuration.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub plan: PlanConfig,
    chunk_size: usize,
}

impl ExtractOptions {
    pub fn new(plan: PlanConfig) -> Self {
        Self {
            plan,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Bytes read per streaming step. Bounds peak memory, never output:
    /// any chunk size of at least one byte produces identical files.
    pub fn chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes.max(1);
        self
    }
}

/// Counters for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionCounters {
    pub files_found: usize,
    pub files_done: usize,
    pub bytes_written: u64,
}

impl ExtractionCounters {
    /// Completion as a truncated percentage; zero when nothing was found.
    pub fn percent(&self) -> usize {
        if self.files_found == 0 {
            0
        } else {
            self.files_done * 100 / self.files_found
        }
    }
}

/// Writes matched entries out to the filesystem, one entry at a time.
///
/// Entries are processed strictly sequentially; each entry's archive and
/// destination handles are opened and dropped before the next entry
/// begins, so handle lifetimes stay trivially scoped.
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Process the match list in order.
    ///
    /// A failing entry is reported through `report` and skipped; only that
    /// entry is counted as not done. Destinations are truncate-created, so
    /// re-running after a partial failure overwrites cleanly.
    pub fn extract(
        &self,
        backend: &dyn ArchiveBackend,
        matches: &[MatchResult],
        report: &mut dyn Report,
    ) -> ExtractionCounters {
        let mut counters = ExtractionCounters {
            files_found: matches.len(),
            ..ExtractionCounters::default()
        };

        for result in matches {
            report.report(Event::EntryStarted {
                path: &result.full_path,
                done: counters.files_done,
                found: counters.files_found,
            });

            match self.extract_one(backend, &result.full_path) {
                Ok(bytes) => {
                    counters.files_done += 1;
                    counters.bytes_written += bytes;
                    report.report(Event::EntryFinished {
                        path: &result.full_path,
                        bytes,
                    });
                }
                Err(error) => {
                    report.report(Event::EntryFailed {
                        path: &result.full_path,
                        error: &error,
                    });
                }
            }
        }

        counters
    }

    /// Extract a single entry, returning the bytes written.
    ///
    /// A legitimately empty entry streams zero bytes and still counts as
    /// done; only actual failures leave an entry not-done.
    fn extract_one(&self, backend: &dyn ArchiveBackend, full_path: &str) -> Result<u64, Error> {
        let destination = plan::plan(full_path, &self.options.plan)?;
        plan::create_directory_chain(&destination)?;

        let mut entry = backend
            .open_entry(full_path)
            .map_err(|source| Error::EntryOpen {
                path: full_path.to_string(),
                source,
            })?;

        let mut dest =
            File::create(&destination.normalized_path).map_err(|source| Error::DestinationOpen {
                path: destination.normalized_path.clone(),
                source,
            })?;

        let mut buffer = vec![0u8; self.options.chunk_size];
        let mut written: u64 = 0;
        loop {
            let read = match entry.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(Error::EntryStream {
                        path: full_path.to_string(),
                        source,
                    })
                }
            };
            dest.write_all(&buffer[..read])
                .map_err(|source| Error::EntryStream {
                    path: destination.normalized_path.clone(),
                    source,
                })?;
            written += read as u64;
        }

        // Both handles drop here, releasing them on success and error alike.
        Ok(written)
    }
}
