//! Background remover port.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use super::base64_bytes;
use crate::error::ProfileError;

/// An encoded image and its MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    /// Encoded image bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// MIME type of the image (e.g., `"image/png"`).
    pub mime_type: String,
}

impl EncodedImage {
    /// Wrap PNG bytes.
    #[must_use]
    pub fn png(data: Vec<u8>) -> Self {
        Self { data, mime_type: "image/png".to_string() }
    }

    /// Size-only description, used where the bytes themselves are not worth keeping.
    #[must_use]
    pub fn summary(&self) -> ImageSummary {
        ImageSummary { mime_type: self.mime_type.clone(), bytes: self.data.len() }
    }
}

/// MIME type and length of an [`EncodedImage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    /// MIME type.
    pub mime_type: String,
    /// Length of the encoded data.
    pub bytes: usize,
}

/// Boxed future type returned by [`BackgroundRemover::strip`].
pub type StripFuture<'a> =
    Pin<Box<dyn Future<Output = Result<EncodedImage, ProfileError>> + Send + 'a>>;

/// Removes the background of a portrait, leaving the subject on transparency.
pub trait BackgroundRemover: Send + Sync {
    /// Strip the background from `image`; the result carries an alpha channel.
    fn strip(&self, image: &EncodedImage) -> StripFuture<'_>;
}
