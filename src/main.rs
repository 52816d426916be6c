use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use halftone::{
    config::HalftoneConfig,
    dithering::Mode,
    run,
    texture::TextureRef,
    utils::image::{read_image, write_image},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "halftone")]
#[command(about = "Convert an image to black and white", long_about = None)]
struct Cli {
    /// to_grayscale, thresholding, random_dithering, ordered_dithering, error_diffusion,
    /// bidirectional_error_diffusion, floyd_steinberg or bidirectional_floyd_steinberg
    mode: Mode,
    /// Path to the input image
    input: PathBuf,
    /// Path to the output image
    output: PathBuf,
    /// JSON config file, flags below take precedence over it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    threshold: Option<f64>,
    #[arg(long)]
    max_intensity: Option<f64>,
    /// Ordered dithering tile edge
    #[arg(long)]
    box_size: Option<usize>,
    #[arg(long)]
    gamma: Option<f64>,
    /// Random dithering seed
    #[arg(long)]
    seed: Option<u64>,
    /// Crop the guard border off error diffusion output
    #[arg(long, overrides_with = "no_crop_border")]
    crop_border: bool,
    /// Keep the guard border even if the config file crops it
    #[arg(long, overrides_with = "crop_border")]
    no_crop_border: bool,
}

impl Cli {
    fn config(&self) -> Result<HalftoneConfig> {
        let mut config = match &self.config {
            Some(path) => HalftoneConfig::read_config(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => HalftoneConfig::default(),
        };
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(max_intensity) = self.max_intensity {
            config.max_intensity = max_intensity;
        }
        if let Some(box_size) = self.box_size {
            config.box_size = box_size;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.crop_border {
            config.crop_border = true;
        } else if self.no_crop_border {
            config.crop_border = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halftone=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;

    let image = read_image(&cli.input)
        .with_context(|| format!("reading image {}", cli.input.display()))?;
    info!(mode = %cli.mode, shape = ?image.shape(), "processing {}", cli.input.display());

    let output = run(&config, cli.mode, image.to_intensity().as_texture_slice())?;
    write_image(&output, &cli.output)
        .with_context(|| format!("writing image {}", cli.output.display()))?;
    info!(shape = ?output.shape(), "wrote {}", cli.output.display());

    Ok(())
}
