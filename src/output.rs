//! Display-name derivation, output file naming, and PNG encoding.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::ProfileError;

/// Derive the caregiver's display name from the photo's file name.
///
/// `mary_jane.jpg` becomes `Mary Jane`. The sheet has no name column, so the
/// photo file name is the only source of the name; a misnamed photo yields a
/// misnamed card.
#[must_use]
pub fn display_name_from_photo(photo: &Path) -> String {
    let stem = photo.file_stem().unwrap_or_default().to_string_lossy();
    title_case(&stem.replace('_', " "))
}

/// Title-case a string: a letter is uppercased when the character before it
/// is not a cased letter, and lowercased otherwise.
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut prev_cased = false;
    for ch in input.chars() {
        if prev_cased {
            result.extend(ch.to_lowercase());
        } else {
            result.extend(ch.to_uppercase());
        }
        prev_cased = ch.is_lowercase() || ch.is_uppercase();
    }
    result
}

/// File stem for a display name: spaces become underscores.
#[must_use]
pub fn file_stem_for_name(name: &str) -> String {
    let stem = name.trim().replace(' ', "_");
    if stem.is_empty() {
        "profile".to_string()
    } else {
        stem
    }
}

/// `{dir}/{stem}.png`, or `{stem}_2.png`, `{stem}_3.png`, ... if taken.
#[must_use]
pub fn unique_output_path(dir: &Path, stem: &str) -> PathBuf {
    let first = dir.join(format!("{stem}.png"));
    if !first.exists() {
        return first;
    }
    (2..)
        .map(|n| dir.join(format!("{stem}_{n}.png")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

/// Save an RGBA image as PNG.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ProfileError> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Encode an image as PNG bytes.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, ProfileError> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
