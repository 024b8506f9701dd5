//! Text measurement and drawing onto RGBA canvases.
//!
//! Scalable faces are rasterized with `fontdue`. When either preferred face
//! cannot be loaded, every element falls back to the built-in bitmap font at
//! one fixed size.

pub mod builtin;
pub mod wrap;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::config::FontsConfig;
use crate::layout::{TextStyle, Weight};

pub use wrap::wrap;

/// Pixel multiplier for the built-in bitmap font.
pub const BUILTIN_SCALE: u32 = 2;

/// Directories searched for relative font names.
const FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts",
    "/usr/share/fonts/truetype",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "C:\\Windows\\Fonts",
];

/// A loaded typeface.
#[derive(Clone)]
pub enum Face {
    /// A TrueType/OpenType font rasterized at the requested size.
    Scalable(Arc<fontdue::Font>),
    /// The built-in bitmap font; requested sizes are ignored.
    Builtin,
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalable(_) => f.write_str("Face::Scalable"),
            Self::Builtin => f.write_str("Face::Builtin"),
        }
    }
}

/// Measured size of a single line of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Advance width.
    pub width: f32,
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box.
    pub descent: f32,
}

impl Extent {
    /// Height of the line box.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Where a drawing position sits relative to the text's line box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Position is the centre of the line box.
    Centre,
    /// Position is the top-left corner of the line box.
    TopLeft,
}

impl Face {
    /// Measure one line of text at `size` pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn extent(&self, text: &str, size: f32) -> Extent {
        match self {
            Self::Scalable(font) => {
                let (ascent, descent) = font
                    .horizontal_line_metrics(size)
                    .map_or((size * 0.8, size * 0.2), |m| (m.ascent, -m.descent));
                let mut width = 0.0;
                let mut prev = None;
                for ch in text.chars() {
                    if let Some(p) = prev {
                        width += font.horizontal_kern(p, ch, size).unwrap_or(0.0);
                    }
                    width += font.metrics(ch, size).advance_width;
                    prev = Some(ch);
                }
                Extent { width, ascent, descent }
            }
            Self::Builtin => {
                let chars = text.chars().count() as f32;
                let advance = (builtin::ADVANCE * BUILTIN_SCALE) as f32;
                let width = if chars > 0.0 { chars * advance - BUILTIN_SCALE as f32 } else { 0.0 };
                Extent {
                    width,
                    ascent: (builtin::GLYPH_HEIGHT * BUILTIN_SCALE) as f32,
                    descent: BUILTIN_SCALE as f32,
                }
            }
        }
    }

    /// Draw one line with its left edge at `x` and baseline at `baseline`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss
    )]
    fn draw_line(
        &self,
        canvas: &mut RgbaImage,
        x: f32,
        baseline: f32,
        text: &str,
        size: f32,
        color: Rgba<u8>,
    ) {
        match self {
            Self::Scalable(font) => {
                let mut pen = x;
                let mut prev = None;
                for ch in text.chars() {
                    if let Some(p) = prev {
                        pen += font.horizontal_kern(p, ch, size).unwrap_or(0.0);
                    }
                    let (metrics, coverage) = font.rasterize(ch, size);
                    let left = (pen + metrics.xmin as f32).round() as i64;
                    let top =
                        (baseline - (metrics.ymin as f32 + metrics.height as f32)).round() as i64;
                    for row in 0..metrics.height {
                        for col in 0..metrics.width {
                            let c = coverage[row * metrics.width + col];
                            if c > 0 {
                                blend(
                                    canvas,
                                    left + col as i64,
                                    top + row as i64,
                                    color,
                                    f32::from(c) / 255.0,
                                );
                            }
                        }
                    }
                    pen += metrics.advance_width;
                    prev = Some(ch);
                }
            }
            Self::Builtin => {
                let scale = i64::from(BUILTIN_SCALE);
                let top = baseline.round() as i64 - i64::from(builtin::GLYPH_HEIGHT) * scale;
                let mut left = x.round() as i64;
                for ch in text.chars() {
                    let glyph = builtin::glyph(ch);
                    for col in 0..builtin::GLYPH_WIDTH {
                        for row in 0..builtin::GLYPH_HEIGHT {
                            if !builtin::is_set(glyph, col, row) {
                                continue;
                            }
                            let px = left + i64::from(col) * scale;
                            let py = top + i64::from(row) * scale;
                            for dy in 0..scale {
                                for dx in 0..scale {
                                    blend(canvas, px + dx, py + dy, color, 1.0);
                                }
                            }
                        }
                    }
                    left += i64::from(builtin::ADVANCE) * scale;
                }
            }
        }
    }
}

/// The bold and regular faces used by a run.
#[derive(Debug, Clone)]
pub struct FontSet {
    bold: Face,
    regular: Face,
}

impl FontSet {
    /// A set that uses the built-in bitmap font everywhere.
    #[must_use]
    pub fn builtin() -> Self {
        Self { bold: Face::Builtin, regular: Face::Builtin }
    }

    /// Load the configured faces, degrading to [`FontSet::builtin`] if either
    /// one is unavailable.
    #[must_use]
    pub fn load(fonts: &FontsConfig) -> Self {
        match (load_face(&fonts.bold), load_face(&fonts.regular)) {
            (Ok(bold), Ok(regular)) => Self { bold, regular },
            (bold, regular) => {
                for err in [bold.err(), regular.err()].into_iter().flatten() {
                    tracing::debug!("{err}; using built-in font");
                }
                Self::builtin()
            }
        }
    }

    /// Whether the degraded bitmap font is in use.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        matches!((&self.bold, &self.regular), (Face::Builtin, Face::Builtin))
    }

    fn face(&self, weight: Weight) -> &Face {
        match weight {
            Weight::Bold => &self.bold,
            Weight::Regular => &self.regular,
        }
    }

    /// Measure `text` in `style`.
    #[must_use]
    pub fn measure(&self, style: &TextStyle, text: &str) -> Extent {
        self.face(style.weight).extent(text, style.size)
    }

    /// Draw one line of text anchored at (`x`, `y`).
    pub fn draw(
        &self,
        canvas: &mut RgbaImage,
        style: &TextStyle,
        anchor: Anchor,
        (x, y): (f32, f32),
        text: &str,
    ) {
        let face = self.face(style.weight);
        let extent = self.measure(style, text);
        let (left, top) = match anchor {
            Anchor::Centre => (x - extent.width / 2.0, y - extent.height() / 2.0),
            Anchor::TopLeft => (x, y),
        };
        face.draw_line(canvas, left, top + extent.ascent, text, style.size, style.color);
    }

    /// Draw a block of lines whose box is centred on (`x`, `y`). Lines are
    /// left-aligned inside the box and separated by `spacing` extra pixels.
    #[allow(clippy::cast_precision_loss)]
    pub fn draw_paragraph(
        &self,
        canvas: &mut RgbaImage,
        style: &TextStyle,
        (x, y): (f32, f32),
        lines: &[String],
        spacing: f32,
    ) {
        if lines.is_empty() {
            return;
        }
        let face = self.face(style.weight);
        let line_box = face.extent("", style.size);
        let step = line_box.height() + spacing;
        let block_height = step * lines.len() as f32 - spacing;
        let block_width =
            lines.iter().map(|line| face.extent(line, style.size).width).fold(0.0, f32::max);

        let left = x - block_width / 2.0;
        let mut top = y - block_height / 2.0;
        for line in lines {
            let extent = face.extent(line, style.size);
            face.draw_line(canvas, left, top + extent.ascent, line, style.size, style.color);
            top += step;
        }
    }
}

/// Find a font file by absolute/relative path or in the system font dirs.
fn resolve_font(name: &str) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(direct.to_path_buf());
    }
    if direct.is_absolute() {
        return None;
    }
    FONT_DIRS.iter().map(|dir| Path::new(dir).join(name)).find(|p| p.is_file())
}

fn load_face(name: &str) -> Result<Face, String> {
    let path = resolve_font(name).ok_or_else(|| format!("font '{name}' not found"))?;
    let bytes = std::fs::read(&path)
        .map_err(|e| format!("failed to read font {}: {e}", path.display()))?;
    let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| format!("failed to parse font {}: {e}", path.display()))?;
    Ok(Face::Scalable(Arc::new(font)))
}

/// Alpha-blend `color` over one canvas pixel, ignoring out-of-bounds writes.
fn blend(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let alpha = coverage * f32::from(color[3]) / 255.0;
    let px = canvas.get_pixel_mut(x, y);
    for i in 0..3 {
        px[i] = mix(px[i], color[i], alpha);
    }
    px[3] = mix(px[3], 255, alpha);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mix(base: u8, over: u8, alpha: f32) -> u8 {
    f32::from(base).mul_add(1.0 - alpha, f32::from(over) * alpha).round().clamp(0.0, 255.0) as u8
}
