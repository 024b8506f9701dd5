//! Photo fetcher port: turns a record's photo locator into files.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use super::base64_bytes;
use crate::error::ProfileError;

/// One file retrieved from a photo folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedFile {
    /// File name as listed in the folder (no directory part).
    pub name: String,
    /// Raw file contents.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Boxed future type returned by [`PhotoFetcher::fetch`].
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<FetchedFile>, ProfileError>> + Send + 'a>>;

/// Retrieves the files of the folder a locator points at, in listing order.
///
/// An implementation may leave out entries that can never be the photo, such
/// as documents it cannot download.
pub trait PhotoFetcher: Send + Sync {
    /// Fetch the folder's files.
    fn fetch(&self, locator: &str) -> FetchFuture<'_>;
}
