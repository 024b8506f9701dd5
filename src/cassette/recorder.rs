//! Captures a run's Drive fetches and background removals.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use super::format::{Cassette, Interaction, BACKGROUND_REMOVER, FETCH, PHOTO_FETCHER, STRIP};
use crate::error::ProfileError;
use crate::ports::{EncodedImage, FetchedFile};

/// Accumulates interactions in call order and writes them out as one YAML
/// cassette when the run ends.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Start a session that will be written to `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        let cassette = Cassette {
            name: name.into(),
            recorded_at: Utc::now(),
            commit: commit.into(),
            interactions: Vec::new(),
        };
        Self { path: path.into(), cassette }
    }

    /// Record the outcome of fetching the folder behind `locator`.
    pub fn record_fetch(
        &mut self,
        locator: &str,
        result: &Result<Vec<FetchedFile>, ProfileError>,
    ) {
        self.push(PHOTO_FETCHER, FETCH, json!({ "locator": locator }), result);
    }

    /// Record a background removal. Only the input's size and type are
    /// kept; its bytes are already part of the preceding fetch.
    pub fn record_strip(
        &mut self,
        input: &EncodedImage,
        result: &Result<EncodedImage, ProfileError>,
    ) {
        let summary = input.summary();
        self.push(
            BACKGROUND_REMOVER,
            STRIP,
            json!({ "mime_type": summary.mime_type, "bytes": summary.bytes }),
            result,
        );
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cassette.interactions.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cassette.interactions.is_empty()
    }

    /// `{"Ok": value}` or `{"Err": message}`. A value that does not serialize
    /// is logged and the interaction dropped.
    fn push<T: Serialize>(
        &mut self,
        port: &str,
        method: &str,
        input: Value,
        result: &Result<T, ProfileError>,
    ) {
        let output = match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(inner) => json!({ "Ok": inner }),
                Err(e) => {
                    tracing::warn!(port, method, error = %e, "interaction not recorded");
                    return;
                }
            },
            Err(e) => json!({ "Err": e.to_string() }),
        };
        let seq = self.cassette.interactions.len() as u64;
        self.cassette.interactions.push(Interaction {
            seq,
            port: port.to_string(),
            method: method.to_string(),
            input,
            output,
        });
    }

    /// Write the cassette, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be serialized or written.
    pub fn finish(self) -> Result<PathBuf, ProfileError> {
        let yaml = serde_yaml::to_string(&self.cassette)
            .map_err(|e| ProfileError::Config(format!("Failed to serialize cassette: {e}")))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, yaml)?;
        tracing::debug!(path = %self.path.display(), "cassette written");
        Ok(self.path)
    }
}
