use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use vibration_icons::config::{Config, IconStyle, Preset};
use vibration_icons::constants::output;
use vibration_icons::converter::SvgToPngConverter;
use vibration_icons::driver::{self, ConvertOutcome};
use vibration_icons::renderer::IconRenderer;

#[derive(Parser)]
#[command(name = "vibration-icons")]
#[command(about = "Generate the Vibration Toolbox PWA icons", long_about = None)]
struct Cli {
    /// Style and output settings (YAML). Defaults to ./icons.yaml when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory the PNG files are written to
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// Icon size in pixels; repeat for several sizes (default: 192 and 512)
    #[arg(short, long = "size", global = true, value_parser = clap::value_parser!(u32).range(1..))]
    sizes: Vec<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the icon procedurally
    Draw {
        /// Icon variant; the configured palette is kept
        #[arg(short, long, value_enum)]
        preset: Option<Preset>,
    },
    /// Rasterize an existing SVG icon (the default)
    Convert {
        /// SVG source (default: icon.svg)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(output::CONFIG_FILE))?,
    };

    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }
    if !cli.sizes.is_empty() {
        config.output.sizes = cli.sizes;
    }

    match cli.command.unwrap_or(Commands::Convert { input: None }) {
        Commands::Draw { preset } => {
            if let Some(preset) = preset {
                let palette = config.style.palette.clone();
                config.style = IconStyle {
                    palette,
                    ..IconStyle::preset(preset)
                };
            }
            config.validate()?;

            let renderer = IconRenderer::new(config.style.clone());
            driver::draw_icons(&renderer, &config.output)?;
        }
        Commands::Convert { input } => {
            if let Some(input) = input {
                config.output.svg_input = input;
            }
            config.validate()?;

            let converter = SvgToPngConverter::with_default_rasterizer(config.style.palette.background);

            // Reported failures still end the run normally
            match driver::convert_icons(&converter, &config.output)? {
                ConvertOutcome::Converted(paths) => log::debug!("Wrote {} icons", paths.len()),
                ConvertOutcome::MissingInput(path) => log::debug!("Nothing to convert, {} missing", path.display()),
                ConvertOutcome::Incomplete { written } => {
                    log::debug!("Conversion incomplete, {} icons written", written.len())
                }
            }
        }
    }

    Ok(())
}
