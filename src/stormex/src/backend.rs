//! Archive storage access.
//!
//! The scanner and extractor only ever talk to storage through
//! [`ArchiveBackend`]: a lazy entry stream plus streamed per-entry reads.
//! CASC-style containers sit behind the same trait without the pipeline
//! knowing anything about their binary format; the crate ships a backend
//! over loose directory trees and an in-memory backend for embedding and
//! tests.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Metadata for one entry inside the archive.
///
/// Produced one at a time during enumeration. Callers that need it past the
/// scan iteration copy what they keep into a
/// [`MatchResult`](crate::scan::MatchResult).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    /// Final path segment (the bare filename).
    pub plain_name: String,
    /// Full archive-internal path, in the container's native separator
    /// convention.
    pub full_path: String,
    /// Declared size in bytes.
    pub size_bytes: u64,
}

/// Read access to one archive storage volume.
///
/// Enumeration order is whatever the container yields; the pipeline only
/// guarantees that matches and extractions follow it.
pub trait ArchiveBackend {
    /// Diagnostic label for this storage (path, container name, ...).
    fn name(&self) -> &str;

    /// Start enumerating entries. Iterator exhaustion is the
    /// end-of-sequence signal; failing to start enumeration is fatal to
    /// the run.
    fn entries(&self) -> io::Result<Box<dyn Iterator<Item = EntryMetadata> + '_>>;

    /// Open one entry for streamed reading. The handle is released on drop.
    fn open_entry(&self, full_path: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// Final path segment of an archive path, across both separator
/// conventions.
pub fn plain_name_of(full_path: &str) -> &str {
    full_path.rsplit(['/', '\\']).next().unwrap_or(full_path)
}

/// Backend over a loose directory tree, for already-unpacked asset dumps.
///
/// Entry paths are relative to the root and use `/` regardless of
/// platform.
pub struct DirectoryBackend {
    root: PathBuf,
    label: String,
}

impl DirectoryBackend {
    /// Open a directory as storage.
    pub fn open<P: AsRef<Path>>(root: P) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a directory: {}", root.display()),
            ));
        }
        let label = root.display().to_string();
        Ok(Self { root, label })
    }

    fn entry_path(&self, full_path: &str) -> PathBuf {
        let relative = full_path.replace('\\', "/");
        self.root.join(relative.trim_start_matches('/'))
    }
}

impl ArchiveBackend for DirectoryBackend {
    fn name(&self) -> &str {
        &self.label
    }

    fn entries(&self) -> io::Result<Box<dyn Iterator<Item = EntryMetadata> + '_>> {
        if !self.root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a directory: {}", self.root.display()),
            ));
        }

        let root = self.root.clone();
        let iter = walkdir::WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(move |entry| {
                let relative = entry.path().strip_prefix(&root).ok()?;
                let full_path = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                let plain_name = entry.file_name().to_string_lossy().into_owned();
                let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
                Some(EntryMetadata {
                    plain_name,
                    full_path,
                    size_bytes,
                })
            });

        Ok(Box::new(iter))
    }

    fn open_entry(&self, full_path: &str) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(self.entry_path(full_path))?;
        Ok(Box::new(file))
    }
}

/// In-memory backend for embedding and tests.
///
/// Entries keep insertion order; duplicate paths are preserved and
/// enumerated twice, matching container behavior.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Vec<(String, Vec<u8>)>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one entry. Paths may use either separator convention.
    pub fn insert(&mut self, full_path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.push((full_path.into(), bytes.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ArchiveBackend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn entries(&self) -> io::Result<Box<dyn Iterator<Item = EntryMetadata> + '_>> {
        Ok(Box::new(self.entries.iter().map(|(path, bytes)| {
            EntryMetadata {
                plain_name: plain_name_of(path).to_string(),
                full_path: path.clone(),
                size_bytes: bytes.len() as u64,
            }
        })))
    }

    fn open_entry(&self, full_path: &str) -> io::Result<Box<dyn Read + '_>> {
        let (_, bytes) = self
            .entries
            .iter()
            .find(|(path, _)| path == full_path)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no entry '{}'", full_path),
                )
            })?;
        Ok(Box::new(io::Cursor::new(bytes.as_slice())))
    }
}
