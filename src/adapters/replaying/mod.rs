//! Replaying adapters that serve recorded interactions from cassettes.

pub mod background_remover;
pub mod photo_fetcher;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::ProfileError;

/// Retrieve the next recorded output for a given port and method.
///
/// # Errors
///
/// Returns an error if the cassette has no more interactions for the pair.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, ProfileError> {
    let mut guard = replayer.lock().map_err(|e| replay_error(format!("{e}")))?;
    guard.next_interaction(port, method).map(|i| i.output.clone()).map_err(replay_error)
}

/// Deserialize a replayed output as `Result<T, ProfileError>`.
///
/// A recorded error comes back as [`ProfileError::Api`] with status 0 and the
/// recorded message.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, ProfileError> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let msg = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(replay_error(msg));
    }
    let value = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| replay_error(format!("Bad recorded output: {e}")))
}

fn replay_error(message: String) -> ProfileError {
    ProfileError::Api { status: 0, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::EncodedImage;
    use serde_json::json;

    #[test]
    fn ok_and_bare_values_deserialize() {
        let image: EncodedImage =
            replay_result(json!({"Ok": {"data": "AQID", "mime_type": "image/png"}})).unwrap();
        assert_eq!(image.data, vec![1, 2, 3]);
        let bare: EncodedImage =
            replay_result(json!({"data": "", "mime_type": "image/png"})).unwrap();
        assert!(bare.data.is_empty());
    }

    #[test]
    fn recorded_error_is_returned() {
        let err = replay_result::<EncodedImage>(json!({"Err": "API error (402): no credits"}))
            .unwrap_err();
        assert!(err.to_string().contains("no credits"));
    }
}
