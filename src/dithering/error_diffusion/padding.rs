use crate::{
    error::Result,
    texture::{Texture, TextureRef, TextureSlice},
};

/// Width of the zero guard on the left and right of a padded map.
pub const GUARD_COLUMNS: usize = 1;
/// Zero rows appended below a padded map.
pub const GUARD_ROWS: usize = 1;

/// Wrap a `width x height` map into a `(width + 2) x (height + 1)` map
/// with a zero border on the left, right and bottom.
pub fn pad_border<T: Default + Copy>(map: TextureSlice<'_, T>) -> Texture<T> {
    let (width, height) = map.shape_2d();
    let planes = map.planes();
    let padded_width = (width + 2 * GUARD_COLUMNS) as u32;
    let padded_height = (height + GUARD_ROWS) as u32;

    let mut padded = Texture::new(padded_width, padded_height, planes);
    let offset = GUARD_COLUMNS * planes as usize;
    for y in 0..height {
        let row = map.row(y);
        padded.row_mut(y)[offset..offset + row.len()].copy_from_slice(row);
    }
    padded
}

/// Map that still carries its guard border.
///
/// Keeping the border is the raw engine output; [Padded::crop] is the
/// explicit step back to the input shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Padded<T> {
    texture: Texture<T>,
}

impl<T: Default + Copy> Padded<T> {
    pub fn new(map: TextureSlice<'_, T>) -> Self {
        Self {
            texture: pad_border(map),
        }
    }
}

impl<T: Clone> Padded<T> {
    /// Drop the guard border.
    pub fn crop(&self) -> Result<Texture<T>> {
        let (width, height) = self.inner_shape();
        self.texture
            .crop(GUARD_COLUMNS, 0, width as u32, height as u32)
    }
}

impl<T> Padded<T> {
    /// Shape of the wrapped map, without the border.
    pub fn inner_shape(&self) -> (usize, usize) {
        let (width, height) = self.texture.shape_2d();
        (width - 2 * GUARD_COLUMNS, height - GUARD_ROWS)
    }

    pub fn as_texture(&self) -> &Texture<T> {
        &self.texture
    }

    pub(crate) fn as_texture_mut(&mut self) -> &mut Texture<T> {
        &mut self.texture
    }

    /// The full buffer, border included.
    pub fn into_texture(self) -> Texture<T> {
        self.texture
    }
}
