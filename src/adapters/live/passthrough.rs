//! Background "removal" that keeps the photo as is.

use crate::ports::background_remover::{BackgroundRemover, EncodedImage, StripFuture};

/// Returns the input unchanged. Selected with `--remover none`.
pub struct PassthroughRemover;

impl BackgroundRemover for PassthroughRemover {
    fn strip(&self, image: &EncodedImage) -> StripFuture<'_> {
        let image = image.clone();
        Box::pin(async move { Ok(image) })
    }
}
