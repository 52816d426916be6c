use tracing::debug;

use crate::{
    error::{HalftoneError, Result},
    prelude::TextureTransform,
    texture::{Texture, TextureRef, TextureSlice},
};

/// Channel weights used to reduce RGB to a single intensity plane.
pub const DEFAULT_GRAYSCALE_WEIGHTS: [f64; 3] = [0.3, 0.6, 0.1];

/// Weighted sum of the first three planes.
///
/// Single plane input is passed through untouched, a fourth (alpha) plane is ignored.
/// Intensities keep the input range, no normalization takes place.
#[derive(Debug, Clone, Copy)]
pub struct Grayscale {
    weights: [f64; 3],
}

impl Default for Grayscale {
    fn default() -> Self {
        Self::new(DEFAULT_GRAYSCALE_WEIGHTS)
    }
}

impl Grayscale {
    pub fn new(weights: [f64; 3]) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> [f64; 3] {
        self.weights
    }
}

impl TextureTransform for Grayscale {
    type Input = f64;
    type Output = f64;

    fn apply(&mut self, input: TextureSlice<'_, f64>) -> Result<Texture<f64>> {
        let planes = input.planes();
        match planes {
            1 => Ok(input.to_texture()),
            3 | 4 => {
                debug!(planes, weights = ?self.weights, "reducing to grayscale");
                let buffer = input
                    .as_ref()
                    .chunks_exact(planes as usize)
                    .map(|pixel| weighted_sum(pixel, &self.weights))
                    .collect();
                Texture::from_vec(input.width(), input.height(), 1, buffer)
            }
            planes => Err(HalftoneError::UnsupportedPlanes(planes)),
        }
    }
}

#[inline]
fn weighted_sum(pixel: &[f64], weights: &[f64; 3]) -> f64 {
    pixel[0] * weights[0] + pixel[1] * weights[1] + pixel[2] * weights[2]
}
