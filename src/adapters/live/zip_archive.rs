//! Zip archive of rendered profiles.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::ProfileError;
use crate::ports::archiver::Archiver;

/// Writes a flat zip, one entry per file, named by base name.
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn bundle(&self, files: &[PathBuf], dest: &Path) -> Result<PathBuf, ProfileError> {
        let mut zip = ZipWriter::new(File::create(dest)?);

        for file in files {
            let name = file.file_name().map(|n| n.to_string_lossy().into_owned()).ok_or_else(
                || ProfileError::InvalidArgument(format!("{} has no file name", file.display())),
            )?;
            zip.start_file::<_, ()>(name, FileOptions::default())?;
            zip.write_all(&std::fs::read(file)?)?;
        }

        zip.finish()?;
        tracing::debug!(archive = %dest.display(), entries = files.len(), "archive written");
        Ok(dest.to_path_buf())
    }
}
