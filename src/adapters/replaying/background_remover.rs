//! Replaying adapter for the `BackgroundRemover` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::format::{BACKGROUND_REMOVER, STRIP};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::background_remover::{BackgroundRemover, EncodedImage, StripFuture};

/// Serves recorded background removals from a cassette.
pub struct ReplayingBackgroundRemover {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingBackgroundRemover {
    /// Create a replaying remover backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl BackgroundRemover for ReplayingBackgroundRemover {
    fn strip(&self, _image: &EncodedImage) -> StripFuture<'_> {
        let output = next_output(&self.replayer, BACKGROUND_REMOVER, STRIP);
        Box::pin(async move { replay_result::<EncodedImage>(output?) })
    }
}
