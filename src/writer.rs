//! Persistence of rendered documents.
//!
//! The composer hands every rendered document to a [`DocumentSink`] exactly
//! once. [`FileSink`] writes under an output root and leaves byte-identical
//! files alone; [`CheckSink`] only compares against what is on disk.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, info};
use similar::TextDiff;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Outcome of persisting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// Existing file already holds exactly this content.
    Unchanged { path: PathBuf },
    /// Dry run: the file would have been written.
    WouldWrite { path: PathBuf },
    /// Check mode: the file on disk differs from the rendered document.
    Stale { path: PathBuf, unified_diff: String },
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written { path }
            | WriteOutcome::Unchanged { path }
            | WriteOutcome::WouldWrite { path }
            | WriteOutcome::Stale { path, .. } => path,
        }
    }

    /// Short label used in the run summary.
    pub fn action(&self) -> &'static str {
        match self {
            WriteOutcome::Written { .. } => "written",
            WriteOutcome::Unchanged { .. } => "unchanged",
            WriteOutcome::WouldWrite { .. } => "would write",
            WriteOutcome::Stale { .. } => "stale",
        }
    }
}

/// Receives each successfully rendered document.
pub trait DocumentSink {
    /// Persists `document` at `path`, relative to the sink's root.
    fn persist(&mut self, path: &Path, document: &str) -> Result<WriteOutcome>;
}

fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(Error::IoError(err)),
    }
}

/// Writes documents below `root`, creating directories as needed.
#[derive(Debug)]
pub struct FileSink {
    root: PathBuf,
    dry_run: bool,
}

impl FileSink {
    pub fn new<P: Into<PathBuf>>(root: P, dry_run: bool) -> Self {
        Self { root: root.into(), dry_run }
    }
}

impl DocumentSink for FileSink {
    fn persist(&mut self, path: &Path, document: &str) -> Result<WriteOutcome> {
        let dest = self.root.join(path);

        if read_existing(&dest)?.as_deref() == Some(document) {
            debug!("Unchanged: {}", dest.display());
            return Ok(WriteOutcome::Unchanged { path: dest });
        }

        if self.dry_run {
            info!("[dry-run] would write: {}", dest.display());
            return Ok(WriteOutcome::WouldWrite { path: dest });
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(Error::IoError)?;
        }
        fs::write(&dest, document).map_err(Error::IoError)?;
        debug!("Wrote: {}", dest.display());
        Ok(WriteOutcome::Written { path: dest })
    }
}

/// Compares documents with the files below `root` without writing anything.
#[derive(Debug)]
pub struct CheckSink {
    root: PathBuf,
}

impl CheckSink {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentSink for CheckSink {
    fn persist(&mut self, path: &Path, document: &str) -> Result<WriteOutcome> {
        let dest = self.root.join(path);
        let existing = read_existing(&dest)?.unwrap_or_default();
        if existing == document {
            return Ok(WriteOutcome::Unchanged { path: dest });
        }

        let old_header = format!("a/{}", path.display());
        let new_header = format!("b/{}", path.display());
        let unified_diff = TextDiff::from_lines(existing.as_str(), document)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();
        debug!("Stale: {}", dest.display());
        Ok(WriteOutcome::Stale { path: dest, unified_diff })
    }
}

/// Keeps documents in memory, keyed by output path.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub documents: IndexMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentSink for MemorySink {
    fn persist(&mut self, path: &Path, document: &str) -> Result<WriteOutcome> {
        let path = path.to_path_buf();
        self.documents.insert(path.clone(), document.to_string());
        Ok(WriteOutcome::Written { path })
    }
}
