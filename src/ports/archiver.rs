//! Archiver port: bundles rendered profiles into one file.

use std::path::{Path, PathBuf};

use crate::error::ProfileError;

/// File name of the archive built inside the run's output directory.
pub const ARCHIVE_NAME: &str = "profiles.zip";

/// Packs files into a single archive.
pub trait Archiver: Send + Sync {
    /// Write every file in `files` into a new archive at `dest`, each entry
    /// named by the file's base name. Returns the archive path.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read or the archive cannot be written.
    fn bundle(&self, files: &[PathBuf], dest: &Path) -> Result<PathBuf, ProfileError>;
}
