//! Live adapter for the remove.bg background removal API.

use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::error::ProfileError;
use crate::ports::background_remover::{BackgroundRemover, EncodedImage, StripFuture};

const REMOVE_BG_URL: &str = "https://api.remove.bg/v1.0/removebg";

/// Sends each photo to remove.bg and returns the PNG cutout.
pub struct RemoveBgRemover {
    client: Client,
    api_key: String,
}

impl RemoveBgRemover {
    /// Create a remover with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self { client: Client::new(), api_key }
    }
}

impl BackgroundRemover for RemoveBgRemover {
    fn strip(&self, image: &EncodedImage) -> StripFuture<'_> {
        let image = image.clone();
        Box::pin(async move {
            let part = Part::bytes(image.data).file_name("photo.png").mime_str(&image.mime_type)?;
            let form = Form::new()
                .part("image_file", part)
                .text("size", "auto")
                .text("format", "png");

            let response = self
                .client
                .post(REMOVE_BG_URL)
                .header("X-Api-Key", &self.api_key)
                .multipart(form)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let message = response.text().await?;
                return Err(ProfileError::Api { status: status.as_u16(), message });
            }

            let data = response.bytes().await?.to_vec();
            tracing::debug!(bytes = data.len(), "background removed");
            Ok(EncodedImage::png(data))
        })
    }
}
