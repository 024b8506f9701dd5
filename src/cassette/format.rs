//! On-disk cassette layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Port name of photo folder fetches.
pub const PHOTO_FETCHER: &str = "photo_fetcher";
/// Method name of [`PHOTO_FETCHER`] calls.
pub const FETCH: &str = "fetch";
/// Port name of background removals.
pub const BACKGROUND_REMOVER: &str = "background_remover";
/// Method name of [`BACKGROUND_REMOVER`] calls.
pub const STRIP: &str = "strip";

/// Every port/method pair a session can contain.
pub const KNOWN_CALLS: [(&str, &str); 2] = [(PHOTO_FETCHER, FETCH), (BACKGROUND_REMOVER, STRIP)];

/// A recorded session: every port interaction of one run, in call order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Human-readable session name.
    pub name: String,
    /// When the session was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit of the recording build, or `"unknown"`.
    pub commit: String,
    /// Interactions in recording order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position in the recording.
    pub seq: u64,
    /// Port name, e.g. `photo_fetcher`.
    pub port: String,
    /// Method name, e.g. `fetch`.
    pub method: String,
    /// What the port was called with.
    #[serde(default)]
    pub input: serde_json::Value,
    /// `{"Ok": ...}` or `{"Err": "message"}`.
    pub output: serde_json::Value,
}
