//! Directory reader
//!
//! Reads the immediate children of a directory under the public root.
//! Every call goes to the filesystem; nothing is cached between calls.

use std::path::{Path, PathBuf};
use tokio::fs;

use super::types::{DirectoryEntry, EntryType, ListingRequest};
use super::{resolve, ListingError};

/// The base directory all listable paths are resolved under
#[derive(Debug, Clone)]
pub struct PublicRoot {
    root: PathBuf,
    confine: bool,
}

impl PublicRoot {
    /// Create a root. With `confine` set, requests climbing above `root`
    /// via `..` are rejected instead of joined.
    pub fn new(root: impl Into<PathBuf>, confine: bool) -> Self {
        Self {
            root: root.into(),
            confine,
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// List the directory named by `request`.
    ///
    /// Entries come back in the order the platform yields them. Any failure,
    /// including one while inspecting a single entry, fails the whole listing.
    pub async fn list(&self, request: &ListingRequest) -> Result<Vec<DirectoryEntry>, ListingError> {
        let dir = resolve(&self.root, &request.path, self.confine)?;
        read_entries(&dir).await
    }
}

async fn read_entries(dir: &Path) -> Result<Vec<DirectoryEntry>, ListingError> {
    let io_err = |e| ListingError::from_io(dir, e);

    let mut read_dir = fs::read_dir(dir).await.map_err(io_err)?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await.map_err(io_err)? {
        // file_type() does not follow symlinks, so a link to a directory is a file
        let file_type = entry.file_type().await.map_err(io_err)?;
        entries.push(DirectoryEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            entry_type: EntryType::from_is_dir(file_type.is_dir()),
        });
    }

    Ok(entries)
}
