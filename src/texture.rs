use std::ops::{Index, IndexMut};

use image::{GrayImage, RgbImage};
use itertools::iproduct;
use num_traits::{Bounded, NumCast, ToPrimitive};

use crate::error::{HalftoneError, Result};

/// (width, height, planes)
pub type Shape = (usize, usize, usize);
/// (width, height)
pub type Shape2D = (usize, usize);

/// Trait defining ops available on Textures with
/// lendable inner buffer
pub trait TextureRef: AsRef<[Self::Inner]> {
    type Inner;

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn planes(&self) -> u32;

    #[inline]
    fn shape(&self) -> Shape {
        (
            self.width() as usize,
            self.height() as usize,
            self.planes() as usize,
        )
    }

    #[inline]
    fn shape_2d(&self) -> Shape2D {
        (self.width() as usize, self.height() as usize)
    }

    /// Buffer index of the first plane of pixel (x, y).
    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.width() as usize + x) * self.planes() as usize
    }

    /// All planes of one row.
    fn row(&self, y: usize) -> &[Self::Inner] {
        let stride = self.width() as usize * self.planes() as usize;
        &self.as_ref()[y * stride..(y + 1) * stride]
    }

    /// All planes of pixel (x, y).
    fn pixel(&self, x: usize, y: usize) -> &[Self::Inner] {
        let idx = self.idx(x, y);
        &self.as_ref()[idx..idx + self.planes() as usize]
    }
}

/// Texture with owned buffer.
///
/// Samples are stored row-major with planes interleaved, so a single plane
/// texture is a plain `height x width` grid addressed by `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture<T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: Vec<T>,
}

impl<T> AsRef<[T]> for Texture<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> AsMut<[T]> for Texture<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }
}

impl<T> TextureRef for Texture<T> {
    type Inner = T;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn planes(&self) -> u32 {
        self.planes
    }
}

/// Sample of the first plane at `(x, y)`.
impl<T> Index<(usize, usize)> for Texture<T> {
    type Output = T;

    #[inline]
    fn index(&self, (x, y): (usize, usize)) -> &T {
        let idx = self.idx(x, y);
        &self.buffer[idx]
    }
}

impl<T> IndexMut<(usize, usize)> for Texture<T> {
    #[inline]
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        let idx = self.idx(x, y);
        &mut self.buffer[idx]
    }
}

#[inline]
fn sample_count(width: u32, height: u32, planes: u32) -> usize {
    width as usize * height as usize * planes as usize
}

impl<T> Texture<T> {
    /// Take ownership of a buffer. Fails if the buffer length does not match
    /// the requested shape.
    pub fn from_vec(width: u32, height: u32, planes: u32, buffer: Vec<T>) -> Result<Self> {
        if buffer.len() != sample_count(width, height, planes) {
            return Err(HalftoneError::ShapeMismatch {
                expected: (width as usize, height as usize, planes as usize),
                found: (buffer.len(), 1, 1),
            });
        }
        Ok(Self {
            width,
            height,
            planes,
            buffer,
        })
    }

    pub fn as_texture_slice(&self) -> TextureSlice<'_, T> {
        TextureSlice {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: &self.buffer,
        }
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let stride = self.width as usize * self.planes as usize;
        &mut self.buffer[y * stride..(y + 1) * stride]
    }

    pub fn into_vec(self) -> Vec<T> {
        self.buffer
    }

    /// First plane sample at `(x, y)`, `None` outside the texture.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        let (width, height) = self.shape_2d();
        (x < width && y < height).then(|| &self.buffer[self.idx(x, y)])
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        self[(x, y)] = value;
    }

    /// Apply `f` to every sample, keeping the shape.
    pub fn map<U, F>(&self, f: F) -> Texture<U>
    where
        F: FnMut(&T) -> U,
    {
        Texture {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: self.buffer.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Texture<T> {
    /// # Panics
    /// This function will panic if the slice length does not match the shape.
    pub fn from_slice(width: u32, height: u32, planes: u32, slice: &[T]) -> Self {
        assert_eq!(
            slice.len(),
            sample_count(width, height, planes),
            "buffers don't match sizes"
        );
        Texture {
            width,
            height,
            planes,
            buffer: slice.to_owned(),
        }
    }

    /// Build a single plane texture from rows. All rows must have the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if let Some(ragged) = rows.iter().find(|row| row.as_ref().len() != width) {
            return Err(HalftoneError::ShapeMismatch {
                expected: (width, rows.len(), 1),
                found: (ragged.as_ref().len(), rows.len(), 1),
            });
        }
        let buffer = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().cloned())
            .collect();
        Ok(Texture {
            width: width as u32,
            height: rows.len() as u32,
            planes: 1,
            buffer,
        })
    }

    /// Copy out a `width x height` region whose top-left pixel is `(x, y)`.
    pub fn crop(&self, x: usize, y: usize, width: u32, height: u32) -> Result<Self> {
        let (self_width, self_height) = self.shape_2d();
        if x + width as usize > self_width || y + height as usize > self_height {
            return Err(HalftoneError::ShapeMismatch {
                expected: (self_width, self_height, self.planes as usize),
                found: (
                    x + width as usize,
                    y + height as usize,
                    self.planes as usize,
                ),
            });
        }

        let planes = self.planes as usize;
        let mut buffer = Vec::with_capacity(width as usize * height as usize * planes);
        for row in y..y + height as usize {
            let start = self.idx(x, row);
            buffer.extend_from_slice(&self.buffer[start..start + width as usize * planes]);
        }
        Ok(Texture {
            width,
            height,
            planes: self.planes,
            buffer,
        })
    }

    /// Repeat this texture periodically until it covers `width x height`,
    /// then crop to exactly that shape.
    ///
    /// > out(x, y) = self(x % self.width, y % self.height)
    pub fn tile(&self, width: u32, height: u32) -> Self {
        let (tile_width, tile_height) = self.shape_2d();
        if tile_width == 0 || tile_height == 0 {
            assert!(
                width == 0 || height == 0,
                "cannot tile an empty texture over a non-empty area"
            );
        }

        let buffer = iproduct!(0..height as usize, 0..width as usize)
            .flat_map(|(y, x)| self.pixel(x % tile_width, y % tile_height).iter().cloned())
            .collect();
        Texture {
            width,
            height,
            planes: self.planes,
            buffer,
        }
    }
}

impl<T: Default + Copy> Texture<T> {
    pub fn new(width: u32, height: u32, planes: u32) -> Self {
        Self {
            width,
            height,
            planes,
            buffer: vec![T::default(); sample_count(width, height, planes)],
        }
    }

    pub fn with_shape(shape: Shape) -> Self {
        let (width, height, planes) = shape;
        Self::new(width as u32, height as u32, planes as u32)
    }
}

impl<T: ToPrimitive> Texture<T> {
    /// Widen any numeric sample type to `f64` intensities.
    pub fn to_intensity(&self) -> Texture<f64> {
        self.map(|v| v.to_f64().unwrap_or(0.0))
    }
}

impl Texture<f64> {
    /// Narrow intensities to a numeric sample type, saturating at the
    /// type's bounds and truncating the fractional part.
    pub fn quantize<U>(&self) -> Texture<U>
    where
        U: NumCast + Bounded + ToPrimitive,
    {
        let min = U::min_value().to_f64().unwrap_or(f64::MIN);
        let max = U::max_value().to_f64().unwrap_or(f64::MAX);
        self.map(|&v| {
            let v = if v.is_nan() { 0.0 } else { v.clamp(min, max).trunc() };
            // in range after the clamp, cast cannot fail
            NumCast::from(v).unwrap_or_else(U::min_value)
        })
    }
}

impl From<GrayImage> for Texture<u8> {
    fn from(value: GrayImage) -> Self {
        let (width, height) = value.dimensions();
        Texture {
            width,
            height,
            planes: 1,
            buffer: value.into_raw(),
        }
    }
}

impl From<RgbImage> for Texture<u8> {
    fn from(value: RgbImage) -> Self {
        let (width, height) = value.dimensions();
        Texture {
            width,
            height,
            planes: 3,
            buffer: value.into_raw(),
        }
    }
}

/// Texture with borrowed internal buffer
#[derive(Debug, Copy, Clone)]
pub struct TextureSlice<'a, T> {
    width: u32,
    height: u32,
    planes: u32,
    buffer: &'a [T],
}

impl<T> AsRef<[T]> for TextureSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn planes(&self) -> u32 {
        self.planes
    }
}

impl<'a, T> TextureSlice<'a, T> {
    /// # Panics
    /// This function will panic if the buffer length does not match the shape.
    pub fn new(width: u32, height: u32, planes: u32, buffer: &'a [T]) -> Self {
        assert_eq!(
            buffer.len(),
            sample_count(width, height, planes),
            "buffers don't match sizes"
        );
        Self {
            width,
            height,
            planes,
            buffer,
        }
    }

    pub fn to_texture(&self) -> Texture<T>
    where
        T: Clone,
    {
        Texture {
            width: self.width,
            height: self.height,
            planes: self.planes,
            buffer: self.buffer.to_vec(),
        }
    }
}

pub mod prelude {
    pub use super::{Shape, Shape2D, Texture, TextureRef, TextureSlice};
}
