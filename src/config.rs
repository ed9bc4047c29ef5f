use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::color::Color;
use crate::constants::{output, palette, waves};
use crate::draw::ArcSpan;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub style: IconStyle,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Everything that distinguishes one icon variant from another
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IconStyle {
    #[serde(default)]
    pub motif: Motif,
    #[serde(default)]
    pub gradient: bool,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub waves: WaveConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Motif {
    /// Rounded phone body with a screen and a speaker slot
    #[default]
    Phone,
    /// Plain circular outline
    Circle,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Palette {
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_gradient_start")]
    pub gradient_start: Color,
    #[serde(default = "default_gradient_end")]
    pub gradient_end: Color,
    #[serde(default = "default_foreground")]
    pub foreground: Color,
    #[serde(default = "default_screen")]
    pub screen: Color,
    #[serde(default = "default_speaker")]
    pub speaker: Color,
}

// The palette constants are known-good hex strings
fn constant_color(hex: &str) -> Color {
    Color::from_hex(hex).unwrap_or(Color::new(0, 0, 0))
}

fn default_background() -> Color {
    constant_color(palette::BACKGROUND)
}

fn default_gradient_start() -> Color {
    constant_color(palette::GRADIENT_START)
}

fn default_gradient_end() -> Color {
    constant_color(palette::GRADIENT_END)
}

fn default_foreground() -> Color {
    constant_color(palette::FOREGROUND)
}

fn default_screen() -> Color {
    constant_color(palette::SCREEN)
}

fn default_speaker() -> Color {
    constant_color(palette::SPEAKER)
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: default_background(),
            gradient_start: default_gradient_start(),
            gradient_end: default_gradient_end(),
            foreground: default_foreground(),
            screen: default_screen(),
            speaker: default_speaker(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn span(self) -> ArcSpan {
        match self {
            Side::Left => ArcSpan::Left,
            Side::Right => ArcSpan::Right,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WaveConfig {
    #[serde(default = "default_wave_count")]
    pub count: u32,
    #[serde(default = "default_sides")]
    pub sides: Vec<Side>,
    /// Lower the opacity of each wave further from the motif
    #[serde(default = "default_fade")]
    pub fade: bool,
}

fn default_wave_count() -> u32 {
    waves::DEFAULT_COUNT
}

fn default_sides() -> Vec<Side> {
    vec![Side::Left, Side::Right]
}

fn default_fade() -> bool {
    true
}

impl Default for WaveConfig {
    fn default() -> Self {
        WaveConfig {
            count: default_wave_count(),
            sides: default_sides(),
            fade: default_fade(),
        }
    }
}

impl WaveConfig {
    /// Opacity of wave `step` (0 = innermost)
    pub fn opacity(&self, step: u32) -> f32 {
        if !self.fade {
            return waves::START_OPACITY;
        }
        (waves::START_OPACITY - waves::FADE_STEP * step as f32).max(0.0)
    }
}

impl Default for IconStyle {
    fn default() -> Self {
        IconStyle::preset(Preset::Phone)
    }
}

/// The three icon variants the web app has shipped with
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Flat indigo background with a phone and fading waves
    Phone,
    /// Vertical purple gradient behind the phone
    Gradient,
    /// Circle outline with solid waves on both sides
    Circle,
}

impl IconStyle {
    pub fn preset(preset: Preset) -> Self {
        let palette = Palette::default();
        match preset {
            Preset::Phone => IconStyle {
                motif: Motif::Phone,
                gradient: false,
                palette,
                waves: WaveConfig::default(),
            },
            Preset::Gradient => IconStyle {
                motif: Motif::Phone,
                gradient: true,
                palette,
                waves: WaveConfig::default(),
            },
            Preset::Circle => IconStyle {
                motif: Motif::Circle,
                gradient: false,
                palette,
                waves: WaveConfig {
                    fade: false,
                    ..WaveConfig::default()
                },
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_sizes")]
    pub sizes: Vec<u32>,
    #[serde(default = "default_file_template")]
    pub file_template: String,
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_svg_input")]
    pub svg_input: PathBuf,
}

fn default_sizes() -> Vec<u32> {
    output::DEFAULT_SIZES.to_vec()
}

fn default_file_template() -> String {
    output::FILE_TEMPLATE.to_string()
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_svg_input() -> PathBuf {
    PathBuf::from(output::SVG_INPUT)
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            sizes: default_sizes(),
            file_template: default_file_template(),
            directory: default_directory(),
            svg_input: default_svg_input(),
        }
    }
}

impl OutputConfig {
    /// `icon-192.png` style path for `size` inside the output directory
    pub fn path_for(&self, size: u32) -> PathBuf {
        let file_name = self
            .file_template
            .replace(output::SIZE_PLACEHOLDER, &size.to_string());
        self.directory.join(file_name)
    }
}

impl Config {
    /// Load `path` if it exists, otherwise fall back to defaults.
    /// Nothing is written back; the only files this tool produces are icons.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Self::load(path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        log::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.output.sizes.is_empty() {
            bail!("sizes cannot be empty");
        }
        if self.output.sizes.contains(&0) {
            bail!("sizes must be greater than 0");
        }

        if !self.output.file_template.contains(output::SIZE_PLACEHOLDER) {
            bail!(
                "file_template must contain {} so each size gets its own file",
                output::SIZE_PLACEHOLDER
            );
        }

        if self.style.waves.count == 0 {
            bail!("waves.count must be greater than 0");
        }
        if self.style.waves.count > waves::MAX_COUNT {
            bail!("waves.count must be <= {}", waves::MAX_COUNT);
        }
        if self.style.waves.sides.is_empty() {
            bail!("waves.sides cannot be empty");
        }

        Ok(())
    }
}
