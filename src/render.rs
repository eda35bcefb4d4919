//! Rendering of encoded module matrices
//!
//! The encoder only produces modules; this module paints them with a quiet
//! zone, either into an `image` buffer or as terminal text.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};

use crate::encoder::config;
use crate::models::BitMatrix;

/// Rendering parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per module edge
    pub module_pixels: u32,
    /// Light border width in modules
    pub quiet_zone: u32,
    /// Color of dark modules
    pub dark: Rgba<u8>,
    /// Color of light modules and the quiet zone
    pub light: Rgba<u8>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_pixels: config::module_pixels() as u32,
            quiet_zone: config::quiet_zone() as u32,
            dark: Rgba([0, 0, 0, 255]),
            light: Rgba([255, 255, 255, 255]),
        }
    }
}

impl RenderOptions {
    /// Output image side in pixels for a matrix of `size` modules
    pub fn image_side(&self, size: usize) -> u32 {
        (size as u32 + 2 * self.quiet_zone) * self.module_pixels
    }

    fn module_at(&self, modules: &BitMatrix, px: u32, py: u32) -> bool {
        let scale = self.module_pixels.max(1);
        let mx = (px / scale) as i64 - self.quiet_zone as i64;
        let my = (py / scale) as i64 - self.quiet_zone as i64;
        mx >= 0 && my >= 0 && modules.get(mx as usize, my as usize)
    }
}

/// Render to an 8-bit grayscale image (dark = 0, light = 255)
pub fn render_luma(modules: &BitMatrix, options: &RenderOptions) -> GrayImage {
    let side = options.image_side(modules.width());
    GrayImage::from_fn(side, side, |x, y| {
        if options.module_at(modules, x, y) {
            Luma([0])
        } else {
            Luma([255])
        }
    })
}

/// Render to an RGBA image using the configured colors
pub fn render_rgba(modules: &BitMatrix, options: &RenderOptions) -> RgbaImage {
    let side = options.image_side(modules.width());
    RgbaImage::from_fn(side, side, |x, y| {
        if options.module_at(modules, x, y) {
            options.dark
        } else {
            options.light
        }
    })
}

/// Centre a logo over the image on a solid light backing square.
///
/// The logo is scaled to `fraction` of the image side (aspect preserved) and
/// the backing extends one module beyond it. Covered modules must be within
/// the error correction budget for the symbol to stay readable.
pub fn overlay_logo(
    canvas: &mut RgbaImage,
    logo: &DynamicImage,
    fraction: f32,
    options: &RenderOptions,
) {
    let side = canvas.width().min(canvas.height());
    let target = ((side as f32) * fraction.clamp(0.0, 1.0)).round() as u32;
    if target == 0 {
        return;
    }
    let scaled = logo.resize(target, target, FilterType::Triangle).to_rgba8();

    let margin = options.module_pixels;
    let back_w = (scaled.width() + 2 * margin).min(canvas.width());
    let back_h = (scaled.height() + 2 * margin).min(canvas.height());
    let back_x = (canvas.width() - back_w) / 2;
    let back_y = (canvas.height() - back_h) / 2;
    for y in back_y..back_y + back_h {
        for x in back_x..back_x + back_w {
            canvas.put_pixel(x, y, options.light);
        }
    }

    let x = (canvas.width() as i64 - scaled.width() as i64) / 2;
    let y = (canvas.height() as i64 - scaled.height() as i64) / 2;
    imageops::overlay(canvas, &scaled, x, y);
}

/// Render as text, two characters per module so cells come out square
pub fn to_terminal_string(modules: &BitMatrix, quiet_zone: usize) -> String {
    let size = modules.width();
    let span = size + 2 * quiet_zone;
    let mut out = String::with_capacity(span * (span * 2 * 3 + 1));
    for y in 0..span {
        for x in 0..span {
            let dark = x >= quiet_zone
                && y >= quiet_zone
                && modules.get(x - quiet_zone, y - quiet_zone);
            out.push_str(if dark { "██" } else { "  " });
        }
        out.push('\n');
    }
    out
}
