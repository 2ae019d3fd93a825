//! Static Chart Renderer
//! Drawing primitives shared by the bar chart and the word cloud: colors,
//! alpha-blended text (horizontal or rotated) and axis helpers.

use image::{GrayImage, Rgba, RgbaImage};
use std::path::PathBuf;
use thiserror::Error;

use super::ChartFont;

// Colors (RGBA)
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const BLUE: Rgba<u8> = Rgba([91, 155, 213, 255]); // Bars
pub const GRAY: Rgba<u8> = Rgba([200, 200, 200, 255]); // Grid lines

/// Word colors, most frequent word first.
pub const PALETTE: [Rgba<u8>; 10] = [
    Rgba([68, 1, 84, 255]),    // Dark purple
    Rgba([59, 82, 139, 255]),  // Indigo
    Rgba([33, 145, 140, 255]), // Teal
    Rgba([94, 201, 98, 255]),  // Green
    Rgba([231, 76, 60, 255]),  // Red
    Rgba([155, 89, 182, 255]), // Purple
    Rgba([243, 156, 18, 255]), // Orange
    Rgba([26, 188, 156, 255]), // Teal
    Rgba([233, 30, 99, 255]),  // Pink
    Rgba([96, 125, 139, 255]), // Blue Grey
];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to read font {}: {source}", path.display())]
    FontUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Not a usable TrueType font: {}", .0.display())]
    InvalidFont(PathBuf),
}

/// Blend `color` over the pixel at (x, y) with coverage `alpha`.
pub fn blend_pixel(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, alpha: u8) {
    if alpha == 0 || x < 0 || y < 0 || x as u32 >= img.width() || y as u32 >= img.height() {
        return;
    }
    let pixel = img.get_pixel_mut(x as u32, y as u32);
    let a = alpha as u16;
    let bg = *pixel;
    for c in 0..3 {
        pixel[c] = ((color[c] as u16 * a + bg[c] as u16 * (255 - a)) / 255) as u8;
    }
}

/// Draw `text` with its top-left corner at (x, y).
pub fn draw_text(
    img: &mut RgbaImage,
    font: &ChartFont,
    size: f32,
    text: &str,
    x: i32,
    y: i32,
    color: Rgba<u8>,
) {
    let Some(mask) = font.rasterize(text, size) else {
        return;
    };
    for (mx, my, coverage) in mask.enumerate_pixels() {
        blend_pixel(img, x + mx as i32, y + my as i32, color, coverage[0]);
    }
}

/// Draw `text` centered horizontally on `center_x`.
pub fn draw_text_centered(
    img: &mut RgbaImage,
    font: &ChartFont,
    size: f32,
    text: &str,
    center_x: i32,
    y: i32,
    color: Rgba<u8>,
) {
    let (w, _) = font.measure(text, size);
    draw_text(img, font, size, text, center_x - w as i32 / 2, y, color);
}

/// Bounding box of a `width` x `height` block rotated by `degrees`.
pub fn rotated_extent(width: u32, height: u32, degrees: f32) -> (u32, u32) {
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let w = width as f32 * cos + height as f32 * sin;
    let h = width as f32 * sin + height as f32 * cos;
    (w.round() as u32, h.round() as u32)
}

/// Draw `text` rotated counter-clockwise by `degrees`, with the top-left of
/// the rotated bounding box at (x, y).
pub fn draw_text_rotated(
    img: &mut RgbaImage,
    font: &ChartFont,
    size: f32,
    text: &str,
    x: i32,
    y: i32,
    degrees: f32,
    color: Rgba<u8>,
) {
    let Some(mask) = font.rasterize(text, size) else {
        return;
    };
    blit_rotated(img, &mask, x, y, degrees, color);
}

fn blit_rotated(img: &mut RgbaImage, mask: &GrayImage, x: i32, y: i32, degrees: f32, color: Rgba<u8>) {
    let (w, h) = mask.dimensions();
    let (rw, rh) = rotated_extent(w, h, degrees);
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin(), theta.cos());

    // Inverse mapping: sample the source mask for each destination pixel.
    for dy in 0..rh {
        for dx in 0..rw {
            let xr = dx as f32 + 0.5 - rw as f32 / 2.0;
            let yr = dy as f32 + 0.5 - rh as f32 / 2.0;
            let sx = xr * cos - yr * sin + w as f32 / 2.0;
            let sy = xr * sin + yr * cos + h as f32 / 2.0;
            if sx < 0.0 || sy < 0.0 || sx >= w as f32 || sy >= h as f32 {
                continue;
            }
            let coverage = mask.get_pixel(sx as u32, sy as u32)[0];
            blend_pixel(img, x + dx as i32, y + dy as i32, color, coverage);
        }
    }
}

/// Round a raw tick interval up to 1, 2 or 5 times a power of ten.
pub fn nice_step(range: f64, target_steps: usize) -> f64 {
    if range <= 0.0 || target_steps == 0 {
        return 1.0;
    }
    let raw_step = range / target_steps as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Map a data value onto a vertical pixel coordinate (larger values higher up).
pub fn map_y(val: f64, y_min: f64, y_max: f64, plot_y: u32, plot_h: u32) -> u32 {
    let ratio = ((val - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    plot_y + plot_h - (ratio * plot_h as f64).round() as u32
}
