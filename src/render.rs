//! Renders one caregiver record into a finished profile card.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader, RgbaImage};

use crate::compose::compose;
use crate::error::ProfileError;
use crate::layout::Layout;
use crate::output::{
    display_name_from_photo, encode_png, file_stem_for_name, save_png, unique_output_path,
};
use crate::ports::{BackgroundRemover, EncodedImage, FetchedFile, PhotoFetcher};
use crate::sheet::Record;
use crate::text::FontSet;

/// File suffixes accepted as photos, compared case-insensitively.
pub const IMAGE_SUFFIXES: [&str; 3] = [".jpg", ".jpeg", ".png"];

/// A card written to disk.
#[derive(Debug, Clone)]
pub struct RenderedProfile {
    /// Display name printed on the card.
    pub name: String,
    /// Where the card was saved.
    pub path: PathBuf,
}

/// Whether `name` looks like a photo we can use.
#[must_use]
pub fn is_recognized_image(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// Index of the first recognized photo among `files`, in listing order.
#[must_use]
pub fn select_photo(files: &[FetchedFile]) -> Option<usize> {
    files.iter().position(|f| is_recognized_image(&f.name))
}

/// Everything a render needs besides the record itself.
pub struct Renderer<'a> {
    /// Photo source.
    pub fetcher: &'a dyn PhotoFetcher,
    /// Background removal.
    pub remover: &'a dyn BackgroundRemover,
    /// Template pixels, never modified.
    pub template: &'a RgbaImage,
    /// Coordinates matching `template`.
    pub layout: &'a Layout,
    /// Faces for every text element.
    pub fonts: &'a FontSet,
}

impl Renderer<'_> {
    /// Render `record` into a PNG inside `out_dir`.
    ///
    /// Fetched files live in a scratch directory that is removed when this
    /// call returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// [`ProfileError::NoPhoto`] when the folder has no usable photo; any
    /// fetch, decode, removal or save failure otherwise.
    pub async fn render(
        &self,
        record: &Record,
        out_dir: &Path,
    ) -> Result<RenderedProfile, ProfileError> {
        let scratch = tempfile::Builder::new().prefix("nannycard-photo-").tempdir()?;

        let files = self.fetcher.fetch(&record.photo_source).await?;
        tracing::debug!(row = record.row, files = files.len(), "photo folder fetched");
        let stored = store_files(scratch.path(), &files)?;

        let (index, photo) = select_photo(&files)
            .and_then(|i| stored[i].clone().map(|path| (i, path)))
            .ok_or_else(|| ProfileError::NoPhoto { locator: record.photo_source.clone() })?;
        let name = display_name_from_photo(Path::new(&files[index].name));

        let rgba = ImageReader::open(&photo)?.with_guessed_format()?.decode()?.to_rgba8();
        let source = EncodedImage::png(encode_png(&DynamicImage::ImageRgba8(rgba))?);
        let stripped = self.remover.strip(&source).await?;
        std::fs::write(scratch.path().join("cutout.png"), &stripped.data)?;
        let cutout = image::load_from_memory(&stripped.data)?.to_rgba8();

        let card = compose(self.template, self.layout, self.fonts, &name, record, &cutout);
        let path = unique_output_path(out_dir, &file_stem_for_name(&name));
        save_png(&card, &path)?;
        tracing::debug!(row = record.row, path = %path.display(), "profile saved");

        Ok(RenderedProfile { name, path })
    }
}

/// Write fetched files into `dir` as `{index}-{base name}`, so entries that
/// share a name never overwrite each other. Entries whose names have no usable
/// file component are kept as `None` so indexes still line up with `files`.
fn store_files(dir: &Path, files: &[FetchedFile]) -> Result<Vec<Option<PathBuf>>, ProfileError> {
    let mut stored = Vec::with_capacity(files.len());
    for (i, file) in files.iter().enumerate() {
        // Listing names come from the remote side; keep only the last component.
        let Some(base) = Path::new(&file.name).file_name() else {
            stored.push(None);
            continue;
        };
        let path = dir.join(format!("{i}-{}", base.to_string_lossy()));
        std::fs::write(&path, &file.data)?;
        stored.push(Some(path));
    }
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::passthrough::PassthroughRemover;
    use crate::ports::photo_fetcher::FetchFuture;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    struct StubFetcher {
        files: Vec<FetchedFile>,
    }

    impl PhotoFetcher for StubFetcher {
        fn fetch(&self, _locator: &str) -> FetchFuture<'_> {
            let files = self.files.clone();
            Box::pin(async move { Ok(files) })
        }
    }

    struct BrokenFetcher;

    impl PhotoFetcher for BrokenFetcher {
        fn fetch(&self, locator: &str) -> FetchFuture<'_> {
            let locator = locator.to_string();
            Box::pin(async move { Err(ProfileError::Locator(locator)) })
        }
    }

    fn jpeg(w: u32, h: u32) -> Vec<u8> {
        let pixels = image::RgbImage::from_pixel(w, h, image::Rgb([90, 60, 40]));
        let img = DynamicImage::ImageRgb8(pixels);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Jpeg).unwrap();
        buf.into_inner()
    }

    fn file(name: &str, data: Vec<u8>) -> FetchedFile {
        FetchedFile { name: name.into(), data }
    }

    fn record() -> Record {
        Record {
            row: 1,
            age: "30".into(),
            location: "Eldoret".into(),
            languages: "English".into(),
            education: "Certificate".into(),
            experience: "4".into(),
            salary: "KES 18000".into(),
            availability: "Weekdays".into(),
            photo_source: "https://drive.google.com/drive/folders/abc".into(),
        }
    }

    async fn render_with(
        fetcher: &dyn PhotoFetcher,
        out_dir: &Path,
    ) -> Result<RenderedProfile, ProfileError> {
        let template = RgbaImage::from_pixel(1080, 1350, Rgba([255, 255, 255, 255]));
        let layout = Layout::default();
        let fonts = FontSet::builtin();
        let renderer = Renderer {
            fetcher,
            remover: &PassthroughRemover,
            template: &template,
            layout: &layout,
            fonts: &fonts,
        };
        renderer.render(&record(), out_dir).await
    }

    #[test]
    fn recognizes_image_suffixes_case_insensitively() {
        assert!(is_recognized_image("a.jpg"));
        assert!(is_recognized_image("a.JPEG"));
        assert!(is_recognized_image("a.Png"));
        assert!(!is_recognized_image("a.gif"));
        assert!(!is_recognized_image("notes.txt"));
        assert!(!is_recognized_image("jpg"));
    }

    #[test]
    fn selects_first_recognized_in_listing_order() {
        let files = vec![file("notes.txt", vec![]), file("b.PNG", vec![]), file("a.jpg", vec![])];
        assert_eq!(select_photo(&files), Some(1));
        assert_eq!(select_photo(&files[..1]), None);
    }

    #[tokio::test]
    async fn renders_card_named_after_photo() {
        let out = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher { files: vec![file("mary_jane.jpg", jpeg(40, 60))] };

        let profile = render_with(&fetcher, out.path()).await.unwrap();

        assert_eq!(profile.name, "Mary Jane");
        assert_eq!(profile.path, out.path().join("Mary_Jane.png"));
        assert!(profile.path.exists());
        assert_eq!(image::open(&profile.path).unwrap().width(), 1080);
        let entries = std::fs::read_dir(out.path()).unwrap().count();
        assert_eq!(entries, 1, "exactly one output file");
    }

    #[tokio::test]
    async fn folder_without_photo_is_a_warning() {
        let out = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher { files: vec![file("cv.pdf", b"%PDF".to_vec())] };

        let err = render_with(&fetcher, out.path()).await.unwrap_err();

        assert!(err.is_warning(), "unexpected error: {err}");
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn fetch_failure_is_an_error() {
        let out = tempfile::tempdir().unwrap();
        let err = render_with(&BrokenFetcher, out.path()).await.unwrap_err();
        assert!(!err.is_warning());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn undecodable_photo_is_an_error() {
        let out = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher { files: vec![file("ann.jpg", b"not really a jpeg".to_vec())] };
        let err = render_with(&fetcher, out.path()).await.unwrap_err();
        assert!(matches!(err, ProfileError::Image(_)), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn remote_names_cannot_escape_scratch_dir() {
        let out = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher { files: vec![file("../../grace_wanjiru.png", jpeg(8, 8))] };
        let profile = render_with(&fetcher, out.path()).await.unwrap();
        assert_eq!(profile.name, "Grace Wanjiru");
    }

    #[tokio::test]
    async fn duplicate_names_in_folder_keep_the_first_listed_photo() {
        let out = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher {
            files: vec![file("ann.jpg", jpeg(8, 8)), file("ann.jpg", b"not a jpeg".to_vec())],
        };
        let profile = render_with(&fetcher, out.path()).await.unwrap();
        assert_eq!(profile.name, "Ann");
    }

    #[tokio::test]
    async fn same_name_twice_gets_distinct_files() {
        let out = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher { files: vec![file("ann.jpg", jpeg(8, 8))] };
        let first = render_with(&fetcher, out.path()).await.unwrap();
        let second = render_with(&fetcher, out.path()).await.unwrap();
        assert_eq!(first.path.file_name().unwrap(), "Ann.png");
        assert_eq!(second.path.file_name().unwrap(), "Ann_2.png");
    }
}
