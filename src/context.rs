//! Service context that bundles the port trait objects which change between
//! live, recording and replaying runs.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::drive::DriveFetcher;
use crate::adapters::live::local::LocalFolderFetcher;
use crate::adapters::live::passthrough::PassthroughRemover;
use crate::adapters::live::remove_bg::RemoveBgRemover;
use crate::adapters::live::routing::RoutingFetcher;
use crate::adapters::recording::background_remover::RecordingBackgroundRemover;
use crate::adapters::recording::photo_fetcher::RecordingPhotoFetcher;
use crate::adapters::replaying::background_remover::ReplayingBackgroundRemover;
use crate::adapters::replaying::photo_fetcher::ReplayingPhotoFetcher;
use crate::cassette::config::open_replayer;
use crate::cassette::recorder::CassetteRecorder;
use crate::cli::RemoverKind;
use crate::config::Config;
use crate::error::ProfileError;
use crate::ports::{BackgroundRemover, PhotoFetcher};

/// Bundles the external-service ports into a single context.
pub struct ServiceContext {
    /// Photo folder source.
    pub fetcher: Box<dyn PhotoFetcher>,
    /// Background removal.
    pub remover: Box<dyn BackgroundRemover>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context.
    ///
    /// Links starting with `http(s)://` go to Google Drive, anything else is
    /// read as a local directory. A missing Google key only fails the records
    /// that need Drive.
    ///
    /// # Errors
    ///
    /// Returns an error if remove.bg is selected and no key is configured.
    pub fn live(remover: RemoverKind, config: &Config) -> Result<Self, ProfileError> {
        let fetcher = RoutingFetcher::new(
            Box::new(DriveFetcher::new(config.google_key())),
            Box::new(LocalFolderFetcher),
        );
        let remover: Box<dyn BackgroundRemover> = match remover {
            RemoverKind::RemoveBg => {
                let key = config.remove_bg_key().ok_or(ProfileError::MissingApiKey {
                    service: "remove.bg".into(),
                    env_var: "REMOVE_BG_API_KEY".into(),
                })?;
                Box::new(RemoveBgRemover::new(key))
            }
            RemoverKind::Passthrough => Box::new(PassthroughRemover),
        };
        Ok(Self { fetcher: Box::new(fetcher), remover })
    }

    /// Create a recording context that wraps the live adapters with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(
        remover: RemoverKind,
        config: &Config,
    ) -> Result<(Self, RecordingSession), ProfileError> {
        let live_ctx = Self::live(remover, config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".nannycard/cassettes")
            .join(&timestamp)
            .join("session.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-session"),
            get_commit_hash(),
        )));

        let ctx = Self {
            fetcher: Box::new(RecordingPhotoFetcher::new(live_ctx.fetcher, Arc::clone(&recorder))),
            remover: Box::new(RecordingBackgroundRemover::new(
                live_ctx.remover,
                Arc::clone(&recorder),
            )),
        };
        Ok((ctx, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file. No keys are needed.
    ///
    /// With [`RemoverKind::Passthrough`] only fetches are replayed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path, remover: RemoverKind) -> Result<Self, ProfileError> {
        let replayer = Arc::new(Mutex::new(open_replayer(path)?));

        let remover: Box<dyn BackgroundRemover> = match remover {
            RemoverKind::RemoveBg => {
                Box::new(ReplayingBackgroundRemover::new(Arc::clone(&replayer)))
            }
            RemoverKind::Passthrough => Box::new(PassthroughRemover),
        };
        Ok(Self { fetcher: Box::new(ReplayingPhotoFetcher::new(replayer)), remover })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_live_needs_no_keys() {
        let ctx = ServiceContext::live(RemoverKind::Passthrough, &Config::default());
        assert!(ctx.is_ok());
    }

    #[test]
    fn replaying_missing_cassette_is_config_error() {
        let err = ServiceContext::replaying(Path::new("/nonexistent.yaml"), RemoverKind::RemoveBg)
            .err()
            .unwrap();
        assert!(matches!(err, ProfileError::Config(_)));
    }
}
