use tracing::debug;

use crate::{
    dithering::threshold::{DEFAULT_MAX_INTENSITY, apply_threshold, bayer::ThresholdMatrix},
    error::Result,
    prelude::TextureTransform,
    texture::{Texture, TextureRef, TextureSlice},
};

pub const DEFAULT_BOX_SIZE: usize = 16;

/// Ordered dithering with a tiled Bayer matrix.
///
/// The matrix ranks are compared as-is against pixel intensities, they are
/// NOT rescaled to `[0, max_intensity]`. With the default 16x16 box the ranks
/// span `0..=255` and happen to line up with 8-bit intensities; smaller boxes
/// produce a much brighter result.
#[derive(Debug, Clone, Copy)]
pub struct OrderedDithering {
    box_size: usize,
    max_intensity: f64,
}

impl Default for OrderedDithering {
    fn default() -> Self {
        Self::new(DEFAULT_BOX_SIZE, DEFAULT_MAX_INTENSITY)
    }
}

impl OrderedDithering {
    pub fn new(box_size: usize, max_intensity: f64) -> Self {
        Self {
            box_size,
            max_intensity,
        }
    }

    /// Per-pixel threshold covering a `width x height` image.
    pub fn threshold_map(&self, width: u32, height: u32) -> Result<Texture<f64>> {
        let matrix = ThresholdMatrix::fitted(self.box_size)?;
        Ok(matrix.to_texture().tile(width, height))
    }
}

impl TextureTransform for OrderedDithering {
    type Input = f64;
    type Output = f64;

    fn apply(&mut self, input: TextureSlice<'_, f64>) -> Result<Texture<f64>> {
        debug!(box_size = self.box_size, shape = ?input.shape(), "ordered dithering");
        let threshold = self.threshold_map(input.width(), input.height())?;
        apply_threshold(input, &threshold, self.max_intensity)
    }
}
