//! Recording adapter for the `BackgroundRemover` port.

use std::sync::{Arc, Mutex};

use super::with_recorder;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::background_remover::{BackgroundRemover, EncodedImage, StripFuture};

/// Records background removals while delegating to an inner implementation.
///
/// Only a summary of the input is stored; the photo itself is already in the
/// cassette as part of the preceding fetch.
pub struct RecordingBackgroundRemover {
    inner: Box<dyn BackgroundRemover>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingBackgroundRemover {
    /// Creates a new recording remover wrapping the given implementation.
    pub fn new(inner: Box<dyn BackgroundRemover>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl BackgroundRemover for RecordingBackgroundRemover {
    fn strip(&self, image: &EncodedImage) -> StripFuture<'_> {
        let image = image.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.strip(&image).await;
            with_recorder(&recorder, |r| r.record_strip(&image, &result));
            result
        })
    }
}
