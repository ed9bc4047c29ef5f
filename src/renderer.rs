use anyhow::{bail, Context, Result};
use image::{ImageFormat, RgbImage};
use std::path::Path;

use crate::color::Color;
use crate::config::{IconStyle, Motif};
use crate::constants::geometry;
use crate::draw::{self, BBox};

/// Draws the app icon procedurally for a given style
pub struct IconRenderer {
    style: IconStyle,
}

impl IconRenderer {
    pub fn new(style: IconStyle) -> Self {
        IconRenderer { style }
    }

    /// Draw the icon into a fresh `size` x `size` RGB canvas. Touches no files.
    pub fn render(&self, size: u32) -> Result<RgbImage> {
        if size == 0 {
            bail!("icon size must be greater than 0");
        }

        let palette = &self.style.palette;
        let mut img = RgbImage::from_pixel(size, size, palette.background.to_rgb());

        if self.style.gradient {
            draw_gradient(&mut img, size, &self.style);
        }

        // Waves go down first so the motif covers their inner ends
        draw_waves(&mut img, size, &self.style);

        match self.style.motif {
            Motif::Phone => draw_phone(&mut img, size, &self.style),
            Motif::Circle => draw_circle(&mut img, size, &self.style),
        }

        log::debug!("Rendered {}x{} {:?} icon", size, size, self.style.motif);
        Ok(img)
    }

    /// Render and write `size` as PNG to `path`, replacing any existing file
    pub fn render_to_file(&self, size: u32, path: &Path) -> Result<()> {
        let img = self.render(size)?;
        save(&img, path)
    }
}

/// Encode `img` as PNG at `path`
pub fn save(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Stroke width in pixels for a fraction of the canvas
fn stroke_px(size: u32, fraction: f32) -> u32 {
    ((size as f32 * fraction) as u32).max(geometry::MIN_STROKE_PX)
}

fn draw_gradient(img: &mut RgbImage, size: u32, style: &IconStyle) {
    let start = style.palette.gradient_start;
    let end = style.palette.gradient_end;
    for y in 0..size {
        draw::fill_row(img, y, Color::gradient_row(start, end, y, size));
    }
}

fn draw_waves(img: &mut RgbImage, size: u32, style: &IconStyle) {
    let waves = &style.waves;
    let center = size as f32 / 2.0;
    let width = stroke_px(size, geometry::WAVE_STROKE);

    for step in 0..waves.count {
        let radius = size as f32 * (geometry::WAVE_BASE_RADIUS + geometry::WAVE_STEP * step as f32);
        let bbox = BBox::around(center, center, radius);
        let opacity = waves.opacity(step);

        for side in &waves.sides {
            draw::stroke_arc(img, bbox, side.span(), width, style.palette.foreground, opacity);
        }
    }
}

fn draw_phone(img: &mut RgbImage, size: u32, style: &IconStyle) {
    let palette = &style.palette;
    let radius = size as f32 * geometry::PHONE_CORNER_RADIUS;

    draw::fill_rounded_rect(
        img,
        BBox::scaled(size, geometry::PHONE_BODY),
        radius,
        palette.foreground,
    );
    draw::fill_rect(img, BBox::scaled(size, geometry::PHONE_SCREEN), palette.screen);
    draw::fill_ellipse(img, BBox::scaled(size, geometry::PHONE_SPEAKER), palette.speaker);
}

fn draw_circle(img: &mut RgbImage, size: u32, style: &IconStyle) {
    let width = stroke_px(size, geometry::CIRCLE_STROKE);
    draw::stroke_ellipse(
        img,
        BBox::scaled(size, geometry::CIRCLE),
        width,
        style.palette.foreground,
    );
}
