//! Progress and diagnostics reporting.
//!
//! The pipeline never prints. Callers inject a [`Report`] implementation
//! and render events however they like; [`Null`] keeps the core silent for
//! embedding and tests.

use crate::Error;

/// One notification from the scanner or extractor.
#[derive(Debug)]
pub enum Event<'a> {
    /// An entry satisfied the criteria. `found` is the running match count.
    MatchFound { path: &'a str, found: usize },
    /// Cadence notification during a long scan.
    ScanProgress { found: usize },
    /// Enumeration finished.
    ScanFinished { found: usize },
    /// Extraction of one entry is starting. `done` of `found` entries have
    /// completed so far.
    EntryStarted {
        path: &'a str,
        done: usize,
        found: usize,
    },
    /// One entry was written out completely.
    EntryFinished { path: &'a str, bytes: u64 },
    /// One entry failed; extraction continues with the next.
    EntryFailed { path: &'a str, error: &'a Error },
}

/// Sink for pipeline events.
pub trait Report {
    fn report(&mut self, event: Event<'_>);
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct Null;

impl Report for Null {
    fn report(&mut self, _event: Event<'_>) {}
}
