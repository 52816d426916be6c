use crate::{
    error::Result,
    prelude::TextureTransform,
    texture::{Texture, TextureSlice},
};

/// Power-law correction relative to the brightest sample.
///
/// > out = m * (in / m) ^ gamma, m = max(in)
#[derive(Debug, Clone, Copy)]
pub struct GammaCorrection {
    gamma: f64,
}

impl GammaCorrection {
    pub fn new(gamma: f64) -> Self {
        Self { gamma }
    }

    pub fn is_identity(&self) -> bool {
        self.gamma == 1.0
    }
}

impl TextureTransform for GammaCorrection {
    type Input = f64;
    type Output = f64;

    fn apply(&mut self, input: TextureSlice<'_, f64>) -> Result<Texture<f64>> {
        let texture = input.to_texture();
        if self.is_identity() {
            return Ok(texture);
        }

        let max = texture.as_ref().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        // all-dark (or empty) input has nothing to scale against
        if !(max.is_finite() && max > 0.0) {
            return Ok(texture);
        }

        let gamma = self.gamma;
        Ok(texture.map(|&v| max * (v / max).powf(gamma)))
    }
}
