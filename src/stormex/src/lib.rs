//! stormex - search and extract files from game-asset archive storage
//!
//! The pipeline has three stages:
//! - scanning walks an [`ArchiveBackend`]'s entry stream and keeps every
//!   entry matching the configured [`SearchCriteria`],
//! - planning maps each matched archive path to a destination on a regular
//!   filesystem, normalizing separators and deriving the directory chain
//!   that has to exist above it,
//! - extraction streams entry bytes to that destination one entry at a
//!   time, with per-entry failure isolation and progress accounting.
//!
//! The archive container itself stays behind the [`ArchiveBackend`] trait;
//! [`DirectoryBackend`] (loose asset trees) and [`MemoryBackend`] ship with
//! the crate. The pipeline never prints; callers inject a [`Report`] to
//! observe progress.

pub mod backend;
pub mod extract;
pub mod filter;
pub mod plan;
pub mod report;
pub mod scan;

pub use backend::{ArchiveBackend, DirectoryBackend, EntryMetadata, MemoryBackend};
pub use extract::{ExtractOptions, ExtractionCounters, Extractor, DEFAULT_CHUNK_SIZE};
pub use filter::SearchCriteria;
pub use plan::{create_directory_chain, DestinationPlan, PlanConfig};
pub use report::{Event, Report};
pub use scan::{parent_directories, MatchResult, Scanner};

use std::io;

/// Errors from scanning and extraction.
///
/// Only [`Error::ArchiveOpen`] is fatal to a run. Every per-entry variant
/// is delivered through [`Report`] and extraction continues with the next
/// entry; a long bulk extraction is never voided by one bad path.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to open the storage '{name}': {source}")]
    ArchiveOpen {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("No entries matched the search criteria")]
    NoMatches,

    #[error("Failed to open archive entry '{path}': {source}")]
    EntryOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open destination '{path}': {source}")]
    DestinationOpen {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while streaming '{path}': {source}")]
    EntryStream {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Refusing to extract '{path}': destination escapes the output root")]
    UnsafePath { path: String },
}
