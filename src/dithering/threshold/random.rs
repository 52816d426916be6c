use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    dithering::threshold::{DEFAULT_MAX_INTENSITY, apply_threshold},
    error::Result,
    prelude::TextureTransform,
    texture::{Texture, TextureRef, TextureSlice},
};

/// Thresholding against white noise.
///
/// Every pixel gets its own threshold drawn uniformly from
/// `[0, max_intensity)`.
#[derive(Debug, Clone)]
pub struct RandomDithering<R: Rng = StdRng> {
    rng: R,
    max_intensity: f64,
}

impl RandomDithering<StdRng> {
    /// Reproducible noise.
    pub fn seeded(seed: u64, max_intensity: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), max_intensity)
    }

    /// Noise seeded from the operating system.
    pub fn from_os_rng(max_intensity: f64) -> Self {
        Self::with_rng(StdRng::from_os_rng(), max_intensity)
    }
}

impl Default for RandomDithering<StdRng> {
    fn default() -> Self {
        Self::from_os_rng(DEFAULT_MAX_INTENSITY)
    }
}

impl<R: Rng> RandomDithering<R> {
    pub fn with_rng(rng: R, max_intensity: f64) -> Self {
        Self { rng, max_intensity }
    }

    /// Draw a noise map with the given shape.
    pub fn noise(&mut self, width: u32, height: u32) -> Texture<f64> {
        let mut noise = Texture::new(width, height, 1);
        if self.max_intensity > 0.0 {
            for value in noise.as_mut() {
                *value = self.rng.random_range(0.0..self.max_intensity);
            }
        }
        noise
    }
}

impl<R: Rng> TextureTransform for RandomDithering<R> {
    type Input = f64;
    type Output = f64;

    fn apply(&mut self, input: TextureSlice<'_, f64>) -> Result<Texture<f64>> {
        let noise = self.noise(input.width(), input.height());
        apply_threshold(input, &noise, self.max_intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HalftoneError;

    fn gradient() -> Texture<f64> {
        let rows = (0..16)
            .map(|y| (0..16).map(|x| (y * 16 + x) as f64).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        Texture::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_noise_range() {
        let mut dithering = RandomDithering::seeded(7, 255.0);
        let noise = dithering.noise(32, 32);
        assert!(
            noise
                .as_ref()
                .iter()
                .all(|v| *v >= 0.0 && *v < 255.0)
        );
    }

    #[test]
    fn test_unit_range_tracks_input_level() {
        let mut dithering = RandomDithering::seeded(1, 1.0);
        for level in [0.1, 0.5, 0.9] {
            let input = Texture::<f64>::new(64, 64, 1).map(|_| level);
            let output = dithering.apply(input.as_texture_slice()).unwrap();
            let lit = output.as_ref().iter().filter(|v| **v == 1.0).count();
            let fraction = lit as f64 / (64.0 * 64.0);
            assert!(
                (fraction - level).abs() < 0.05,
                "level {} lit {}",
                level,
                fraction
            );
        }
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let input = gradient();
        let a = RandomDithering::seeded(42, 255.0)
            .once(input.as_texture_slice())
            .unwrap();
        let b = RandomDithering::seeded(42, 255.0)
            .once(input.as_texture_slice())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_is_binary() {
        let output = RandomDithering::seeded(1, 255.0)
            .once(gradient().as_texture_slice())
            .unwrap();
        assert_eq!(output.shape(), (16, 16, 1));
        assert!(output.as_ref().iter().all(|v| *v == 0.0 || *v == 255.0));
    }

    #[test]
    fn test_extremes_are_fixed() {
        // nothing is below 0, everything is below the max
        let black = Texture::<f64>::new(8, 8, 1);
        let white = black.map(|_| 255.0);
        let mut dithering = RandomDithering::seeded(3, 255.0);

        let output = dithering.apply(black.as_texture_slice()).unwrap();
        assert!(output.as_ref().iter().all(|v| *v == 0.0));
        let output = dithering.apply(white.as_texture_slice()).unwrap();
        assert!(output.as_ref().iter().all(|v| *v == 255.0));
    }

    #[test]
    fn test_multi_plane_input_is_rejected() {
        let input = Texture::<f64>::new(2, 2, 3);
        let result = RandomDithering::seeded(0, 255.0).once(input.as_texture_slice());
        assert!(matches!(result, Err(HalftoneError::ShapeMismatch { .. })));
    }
}
