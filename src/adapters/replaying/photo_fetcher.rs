//! Replaying adapter for the `PhotoFetcher` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::format::{FETCH, PHOTO_FETCHER};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::photo_fetcher::{FetchFuture, FetchedFile, PhotoFetcher};

/// Serves recorded folder fetches from a cassette.
pub struct ReplayingPhotoFetcher {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingPhotoFetcher {
    /// Create a replaying fetcher backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl PhotoFetcher for ReplayingPhotoFetcher {
    fn fetch(&self, _locator: &str) -> FetchFuture<'_> {
        let output = next_output(&self.replayer, PHOTO_FETCHER, FETCH);
        Box::pin(async move { replay_result::<Vec<FetchedFile>>(output?) })
    }
}
