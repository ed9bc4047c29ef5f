use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::OutputConfig;
use crate::converter::{created_message, ConvertError, SvgToPngConverter};
use crate::renderer::IconRenderer;

/// How a run of the convert path ended
#[derive(Debug, PartialEq)]
pub enum ConvertOutcome {
    /// Every size was written
    Converted(Vec<PathBuf>),
    /// The SVG source was missing; nothing was attempted
    MissingInput(PathBuf),
    /// At least one size could not be rasterized. Files that were written stay.
    Incomplete { written: Vec<PathBuf> },
}

fn ensure_output_dir(output: &OutputConfig) -> Result<()> {
    fs::create_dir_all(&output.directory).with_context(|| {
        format!("Failed to create output directory {}", output.directory.display())
    })
}

/// Draw the icon at every configured size
pub fn draw_icons(renderer: &IconRenderer, output: &OutputConfig) -> Result<Vec<PathBuf>> {
    println!("Generating icons...");
    ensure_output_dir(output)?;

    let mut written = Vec::with_capacity(output.sizes.len());
    for &size in &output.sizes {
        let path = output.path_for(size);
        renderer.render_to_file(size, &path)?;
        println!("✓ Created {} ({}x{})", path.display(), size, size);
        written.push(path);
    }

    println!("✅ Icons created successfully!");
    Ok(written)
}

/// Rasterize the configured SVG at every configured size.
///
/// A missing source or a missing rasterizer is reported on the console and
/// in the returned outcome. Anything else (unreadable SVG, unwritable output)
/// is an error.
pub fn convert_icons(
    converter: &SvgToPngConverter,
    output: &OutputConfig,
) -> Result<ConvertOutcome> {
    let input = &output.svg_input;
    if !input.is_file() {
        eprintln!("Error: {} not found!", input.display());
        return Ok(ConvertOutcome::MissingInput(input.clone()));
    }

    ensure_output_dir(output)?;

    let mut written = Vec::with_capacity(output.sizes.len());
    let mut all_ok = true;

    for &size in &output.sizes {
        let path = output.path_for(size);
        match converter.try_convert(input, &path, size) {
            Ok(()) => {
                println!("{}", created_message(&path, size));
                written.push(path);
            }
            Err(e @ (ConvertError::MissingCapability | ConvertError::MissingInput(_))) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                all_ok = false;
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to create {}", path.display())),
        }
    }

    if all_ok {
        println!("✅ Icons created successfully from SVG!");
        Ok(ConvertOutcome::Converted(written))
    } else {
        eprintln!("⚠️  SVG rasterization is not available in this build.");
        eprintln!("   Rebuild with: cargo build --features svg");
        eprintln!("   Or draw the icons instead: vibration-icons draw");
        Ok(ConvertOutcome::Incomplete { written })
    }
}
