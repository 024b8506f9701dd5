//! Recording adapter for the `PhotoFetcher` port.

use std::sync::{Arc, Mutex};

use super::with_recorder;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::photo_fetcher::{FetchFuture, PhotoFetcher};

/// Records folder fetches while delegating to an inner implementation.
pub struct RecordingPhotoFetcher {
    inner: Box<dyn PhotoFetcher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingPhotoFetcher {
    /// Creates a new recording fetcher wrapping the given implementation.
    pub fn new(inner: Box<dyn PhotoFetcher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl PhotoFetcher for RecordingPhotoFetcher {
    fn fetch(&self, locator: &str) -> FetchFuture<'_> {
        let locator = locator.to_string();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.fetch(&locator).await;
            with_recorder(&recorder, |r| r.record_fetch(&locator, &result));
            result
        })
    }
}
