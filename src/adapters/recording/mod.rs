//! Recording adapters that capture interactions to cassettes.

pub mod background_remover;
pub mod photo_fetcher;

use std::sync::{Arc, Mutex};

use crate::cassette::recorder::CassetteRecorder;

/// Run `record` against the shared recorder. A poisoned lock is logged and
/// the interaction skipped; recording never changes the outcome of a call.
pub(crate) fn with_recorder(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    record: impl FnOnce(&mut CassetteRecorder),
) {
    match recorder.lock() {
        Ok(mut guard) => record(&mut *guard),
        Err(e) => tracing::warn!(error = %e, "recorder lock poisoned; interaction not recorded"),
    }
}
