//! Chart font loading and text rasterization.

use image::{GrayImage, Luma};
use rusttype::{point, Font, Scale};
use std::fs;
use std::path::{Path, PathBuf};

use super::RenderError;

/// Well-known sans-serif fonts tried when no explicit font is configured.
const SYSTEM_FONT_CANDIDATES: [&str; 8] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font used for all chart text. Without a font, text is measured by
/// estimate and never drawn.
pub struct ChartFont {
    font: Option<Font<'static>>,
}

impl ChartFont {
    /// Load `explicit` if given, otherwise the first readable system font.
    pub fn load(explicit: Option<&Path>) -> Result<Self, RenderError> {
        if let Some(path) = explicit {
            return Self::from_file(path).map(|font| Self { font: Some(font) });
        }

        for candidate in SYSTEM_FONT_CANDIDATES {
            let path = Path::new(candidate);
            if !path.is_file() {
                continue;
            }
            match Self::from_file(path) {
                Ok(font) => {
                    tracing::debug!(font = candidate, "using system font");
                    return Ok(Self { font: Some(font) });
                }
                Err(e) => tracing::debug!(font = candidate, error = %e, "skipping font"),
            }
        }

        tracing::warn!("no usable system font found; charts will be drawn without text");
        Ok(Self::none())
    }

    /// A font-less instance; layout still works, text is skipped.
    pub fn none() -> Self {
        Self { font: None }
    }

    pub fn is_available(&self) -> bool {
        self.font.is_some()
    }

    fn from_file(path: &Path) -> Result<Font<'static>, RenderError> {
        let bytes = fs::read(path).map_err(|source| RenderError::FontUnreadable {
            path: PathBuf::from(path),
            source,
        })?;
        Font::try_from_vec(bytes).ok_or_else(|| RenderError::InvalidFont(path.to_path_buf()))
    }

    /// Width and height in pixels of `text` set at `size`.
    pub fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        let Some(font) = &self.font else {
            let width = (text.chars().count() as f32 * size * 3.0 / 5.0).ceil();
            return (width as u32, size.ceil() as u32);
        };

        let scale = Scale::uniform(size);
        let v_metrics = font.v_metrics(scale);
        let height = (v_metrics.ascent - v_metrics.descent).ceil().max(1.0) as u32;
        let width = font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .fold(0.0f32, f32::max)
            .ceil() as u32;
        (width, height)
    }

    /// Coverage mask of `text`, sized exactly as `measure` reports.
    pub fn rasterize(&self, text: &str, size: f32) -> Option<GrayImage> {
        let font = self.font.as_ref()?;
        let (width, height) = self.measure(text, size);
        if width == 0 || height == 0 {
            return None;
        }

        let scale = Scale::uniform(size);
        let v_metrics = font.v_metrics(scale);
        let mut mask = GrayImage::new(width, height);
        for glyph in font.layout(text, scale, point(0.0, v_metrics.ascent)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                    let alpha = (v * 255.0) as u8;
                    let pixel = mask.get_pixel_mut(px as u32, py as u32);
                    *pixel = Luma([pixel[0].max(alpha)]);
                }
            });
        }
        Some(mask)
    }
}
