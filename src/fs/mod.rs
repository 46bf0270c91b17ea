//! File status views for remote object stores.

use fusio::path::Path;

/// Metadata a listing reports for one path.
pub trait FileStatus {
    /// Size in bytes, or a negative value when unknown.
    fn length(&self) -> i64;

    /// True for directories.
    fn is_dir(&self) -> bool;

    /// Location of the entry.
    fn path(&self) -> &Path;

    /// Milliseconds since the epoch, or a negative value when unknown.
    fn modification_time(&self) -> i64;
}

/// Status of a directory on a store that keeps no directory metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryFileStatus {
    path: Path,
}

impl DirectoryFileStatus {
    /// Reported for [`FileStatus::length`].
    pub const UNKNOWN_LENGTH: i64 = -1;
    /// Reported for [`FileStatus::modification_time`].
    pub const UNKNOWN_MODIFICATION_TIME: i64 = -1;

    /// Status for the directory at `path`.
    pub fn new(path: Path) -> Self {
        Self { path }
    }
}

impl From<Path> for DirectoryFileStatus {
    fn from(path: Path) -> Self {
        Self::new(path)
    }
}

impl FileStatus for DirectoryFileStatus {
    fn length(&self) -> i64 {
        Self::UNKNOWN_LENGTH
    }

    fn is_dir(&self) -> bool {
        true
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn modification_time(&self) -> i64 {
        Self::UNKNOWN_MODIFICATION_TIME
    }
}
