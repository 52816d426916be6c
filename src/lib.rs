//! Binary halftoning of continuous-tone images.
//!
//! Thresholding, random dithering, ordered (Bayer) dithering and error
//! diffusion, all producing maps whose samples are either `0` or
//! `max_intensity`.

use tracing::debug;

use crate::{
    config::HalftoneConfig,
    dithering::Mode,
    error::Result,
    texture::{Texture, TextureRef, TextureSlice},
    transform::prelude::*,
};

pub mod config;
pub mod dithering;
pub mod error;
pub mod texture;
pub mod transform;
pub mod utils;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::texture::prelude::*;
    pub use crate::transform::prelude::*;
}

/// Grayscale reduction, gamma correction, then the halftoning `mode`.
///
/// `input` may have 1, 3 or 4 planes.
pub fn run(
    config: &HalftoneConfig,
    mode: Mode,
    input: TextureSlice<'_, f64>,
) -> Result<Texture<f64>> {
    config.validate()?;
    debug!(%mode, shape = ?input.shape(), "halftoning");

    let mut pipeline = Grayscale::new(config.grayscale_weights)
        .pipe(GammaCorrection::new(config.gamma))
        .pipe(mode.build(config));
    pipeline.apply(input)
}
