use anyhow::Result;
use image::{RgbImage, RgbaImage};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::color::Color;
use crate::renderer;

/// Turns SVG source into a square RGBA raster
pub trait Rasterizer {
    fn name(&self) -> &str;

    /// Scale `svg` to exactly `size` x `size`. `resources_dir` resolves
    /// relative references such as linked images.
    fn rasterize(&self, svg: &[u8], resources_dir: Option<&Path>, size: u32) -> Result<RgbaImage>;
}

#[cfg(feature = "svg")]
pub struct ResvgRasterizer;

#[cfg(feature = "svg")]
impl Rasterizer for ResvgRasterizer {
    fn name(&self) -> &str {
        "resvg"
    }

    fn rasterize(&self, svg: &[u8], resources_dir: Option<&Path>, size: u32) -> Result<RgbaImage> {
        use anyhow::Context;
        use resvg::{tiny_skia, usvg};

        let mut opt = usvg::Options::default();
        opt.resources_dir = resources_dir.map(Path::to_path_buf);

        let tree = usvg::Tree::from_data(svg, &opt).context("Failed to parse SVG")?;
        let source = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            size as f32 / source.width(),
            size as f32 / source.height(),
        );

        let mut pixmap = tiny_skia::Pixmap::new(size, size)
            .with_context(|| format!("Failed to allocate {}x{} pixmap", size, size))?;
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        // tiny-skia stores premultiplied alpha
        let mut img = RgbaImage::new(size, size);
        for (src, dst) in pixmap.pixels().iter().zip(img.pixels_mut()) {
            let c = src.demultiply();
            *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(img)
    }
}

/// The rasterizer compiled into this build, if any
pub fn default_rasterizer() -> Option<Box<dyn Rasterizer>> {
    #[cfg(feature = "svg")]
    {
        Some(Box::new(ResvgRasterizer))
    }
    #[cfg(not(feature = "svg"))]
    {
        None
    }
}

#[derive(Debug)]
pub enum ConvertError {
    /// The vector source does not exist
    MissingInput(PathBuf),
    /// No rasterizer is available in this build
    MissingCapability,
    Rasterize(anyhow::Error),
    Write(anyhow::Error),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::MissingInput(path) => write!(f, "{} not found", path.display()),
            ConvertError::MissingCapability => write!(f, "no SVG rasterizer available"),
            ConvertError::Rasterize(e) => write!(f, "failed to rasterize SVG: {:#}", e),
            ConvertError::Write(e) => write!(f, "{:#}", e),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Rasterize(e) | ConvertError::Write(e) => Some(&**e),
            _ => None,
        }
    }
}

/// Rasterizes an existing SVG icon to opaque PNGs
pub struct SvgToPngConverter {
    rasterizer: Option<Box<dyn Rasterizer>>,
    background: Color,
}

impl SvgToPngConverter {
    /// `background` fills transparent areas, since the icons are RGB
    pub fn new(rasterizer: Option<Box<dyn Rasterizer>>, background: Color) -> Self {
        SvgToPngConverter { rasterizer, background }
    }

    pub fn with_default_rasterizer(background: Color) -> Self {
        Self::new(default_rasterizer(), background)
    }

    pub fn is_available(&self) -> bool {
        self.rasterizer.is_some()
    }

    pub fn try_convert(&self, input: &Path, output: &Path, size: u32) -> Result<(), ConvertError> {
        if !input.is_file() {
            return Err(ConvertError::MissingInput(input.to_path_buf()));
        }
        let rasterizer = self
            .rasterizer
            .as_ref()
            .ok_or(ConvertError::MissingCapability)?;

        if size == 0 {
            return Err(ConvertError::Rasterize(anyhow::anyhow!(
                "icon size must be greater than 0"
            )));
        }

        let svg = fs::read(input).map_err(|e| {
            ConvertError::Rasterize(anyhow::Error::new(e).context(format!(
                "Failed to read {}",
                input.display()
            )))
        })?;

        let resources_dir = fs::canonicalize(input)
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf));

        log::debug!("Rasterizing {} with {} at {}px", input.display(), rasterizer.name(), size);
        let rgba = rasterizer
            .rasterize(&svg, resources_dir.as_deref(), size)
            .map_err(ConvertError::Rasterize)?;

        let img = flatten(&rgba, self.background);
        renderer::save(&img, output).map_err(ConvertError::Write)?;

        Ok(())
    }

    /// Convert one size, reporting the outcome instead of returning an error
    pub fn convert(&self, input: &Path, output: &Path, size: u32) -> bool {
        match self.try_convert(input, output, size) {
            Ok(()) => {
                println!("{}", created_message(output, size));
                true
            }
            Err(e) => {
                eprintln!("⚠️  Could not create {}: {}", output.display(), e);
                false
            }
        }
    }
}

/// Status line for a converted icon
pub fn created_message(output: &Path, size: u32) -> String {
    format!("✓ Created {} ({}x{}) from SVG", output.display(), size, size)
}

/// Composite an RGBA raster over a solid color
pub fn flatten(rgba: &RgbaImage, background: Color) -> RgbImage {
    let mut img = RgbImage::new(rgba.width(), rgba.height());
    for (src, dst) in rgba.pixels().zip(img.pixels_mut()) {
        let [r, g, b, a] = src.0;
        let color = Color::new(r, g, b).over(background, a as f32 / 255.0);
        *dst = color.to_rgb();
    }
    img
}
