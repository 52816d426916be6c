//! Global thresholding and the threshold based dithering modes built on it.
//!
//! Every mode here reduces to [apply_threshold]: a sample becomes
//! `max_intensity` when it strictly exceeds its threshold, `0` otherwise.
//! The modes only differ in where the per-pixel threshold comes from.

pub mod bayer;
pub mod ordered;
pub mod random;

use crate::{
    error::{HalftoneError, Result},
    prelude::TextureTransform,
    texture::{Texture, TextureRef, TextureSlice},
};

pub const DEFAULT_THRESHOLD: f64 = 128.0;
pub const DEFAULT_MAX_INTENSITY: f64 = 255.0;

/// Threshold applied by [apply_threshold].
#[derive(Debug, Clone, Copy)]
pub enum Threshold<'a> {
    /// Same threshold for every pixel.
    Scalar(f64),
    /// One threshold per pixel. Either the input's shape, or a tile whose
    /// width and height divide the input's, repeated with [Texture::tile].
    Map(TextureSlice<'a, f64>),
}

impl From<f64> for Threshold<'_> {
    fn from(value: f64) -> Self {
        Threshold::Scalar(value)
    }
}

impl<'a> From<&'a Texture<f64>> for Threshold<'a> {
    fn from(value: &'a Texture<f64>) -> Self {
        Threshold::Map(value.as_texture_slice())
    }
}

/// Binarize `input` against `threshold`.
///
/// > out(x, y) = max_intensity if in(x, y) > threshold(x, y) else 0
pub fn apply_threshold<'t>(
    input: TextureSlice<'_, f64>,
    threshold: impl Into<Threshold<'t>>,
    max_intensity: f64,
) -> Result<Texture<f64>> {
    let binarize = |value: f64, threshold: f64| {
        if value > threshold { max_intensity } else { 0.0 }
    };

    match threshold.into() {
        Threshold::Scalar(threshold) => {
            Ok(input.to_texture().map(|&value| binarize(value, threshold)))
        }
        Threshold::Map(map) => {
            let tiled;
            let map = if map.shape() == input.shape() {
                map
            } else if tiles(map, input) {
                tiled = map.to_texture().tile(input.width(), input.height());
                tiled.as_texture_slice()
            } else {
                return Err(HalftoneError::ShapeMismatch {
                    expected: input.shape(),
                    found: map.shape(),
                });
            };
            let buffer = input
                .as_ref()
                .iter()
                .zip(map.as_ref())
                .map(|(&value, &threshold)| binarize(value, threshold))
                .collect();
            Texture::from_vec(input.width(), input.height(), input.planes(), buffer)
        }
    }
}

/// `tile` repeats a whole number of times across `input`.
fn tiles(tile: TextureSlice<'_, f64>, input: TextureSlice<'_, f64>) -> bool {
    let (tile_width, tile_height, tile_planes) = tile.shape();
    let (width, height, planes) = input.shape();
    tile_planes == planes
        && tile_width > 0
        && tile_height > 0
        && width % tile_width == 0
        && height % tile_height == 0
}

/// Global thresholding against a single scalar.
#[derive(Debug, Clone, Copy)]
pub struct Thresholding {
    threshold: f64,
    max_intensity: f64,
}

impl Default for Thresholding {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_MAX_INTENSITY)
    }
}

impl Thresholding {
    pub fn new(threshold: f64, max_intensity: f64) -> Self {
        Self {
            threshold,
            max_intensity,
        }
    }
}

impl TextureTransform for Thresholding {
    type Input = f64;
    type Output = f64;

    fn apply(&mut self, input: TextureSlice<'_, f64>) -> Result<Texture<f64>> {
        apply_threshold(input, self.threshold, self.max_intensity)
    }
}
