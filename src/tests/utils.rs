use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::texture::Texture;

/// Test image size - kept small for fast tests
pub const TEST_SIZE: u32 = 48;

/// Single plane map of uniform noise in `[0, 255]`.
pub fn gen_random_map(width: u32, height: u32, seed: u64) -> Texture<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Texture::<f64>::new(width, height, 1).map(|_| rng.random_range(0.0..=255.0))
}

/// RGB map of uniform noise in `[0, 255]`.
pub fn gen_random_rgb(width: u32, height: u32, seed: u64) -> Texture<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Texture::<f64>::new(width, height, 3).map(|_| rng.random_range(0.0..=255.0))
}

/// Horizontal ramp from 0 to 255.
pub fn gen_gradient(width: u32, height: u32) -> Texture<f64> {
    let row: Vec<f64> = (0..width)
        .map(|x| 255.0 * x as f64 / (width.max(2) - 1) as f64)
        .collect();
    let rows = vec![row; height as usize];
    Texture::from_rows(&rows).unwrap()
}

pub fn is_binary(samples: &[f64], max_intensity: f64) -> bool {
    samples.iter().all(|v| *v == 0.0 || *v == max_intensity)
}
