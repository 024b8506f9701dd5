//! Photo folders on the local filesystem.

use std::path::{Path, PathBuf};

use crate::error::ProfileError;
use crate::ports::photo_fetcher::{FetchFuture, FetchedFile, PhotoFetcher};

/// Reads the regular files of a local directory, sorted by name.
pub struct LocalFolderFetcher;

impl PhotoFetcher for LocalFolderFetcher {
    fn fetch(&self, locator: &str) -> FetchFuture<'_> {
        let dir = PathBuf::from(locator.trim());
        Box::pin(async move { read_folder(&dir) })
    }
}

fn read_folder(dir: &Path) -> Result<Vec<FetchedFile>, ProfileError> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ProfileError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read photo folder {}: {e}", dir.display()),
        ))
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path.file_name().unwrap_or_default().to_string_lossy().into_owned();
        files.push(FetchedFile { name, data: std::fs::read(&path)? });
    }
    Ok(files)
}
