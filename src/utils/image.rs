use image::{GrayImage, ImageReader, RgbImage};
use std::path::Path;
use tracing::debug;

use crate::{
    error::{HalftoneError, Result},
    texture::{Texture, TextureRef},
};

/// Decode an image from disk.
///
/// Grayscale images become a single plane texture, anything with color
/// becomes a 3 plane RGB texture. Alpha is dropped.
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<Texture<u8>> {
    let image = ImageReader::open(path.as_ref())?
        .with_guessed_format()?
        .decode()?;
    debug!(
        path = %path.as_ref().display(),
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "decoded image"
    );
    let texture = if image.color().has_color() {
        image.to_rgb8().into()
    } else {
        image.to_luma8().into()
    };
    Ok(texture)
}

/// Encode intensities as an 8-bit image, the format follows the file extension.
///
/// Samples are saturated to `0..=255` and truncated.
pub fn write_image<P: AsRef<Path>>(texture: &Texture<f64>, path: P) -> Result {
    let (width, height) = (texture.width(), texture.height());
    let buffer = texture.quantize::<u8>().into_vec();
    let len = buffer.len();
    let mismatch = || HalftoneError::ShapeMismatch {
        expected: texture.shape(),
        found: (len, 1, 1),
    };
    match texture.planes() {
        1 => GrayImage::from_raw(width, height, buffer)
            .ok_or_else(mismatch)?
            .save(path)?,
        3 => RgbImage::from_raw(width, height, buffer)
            .ok_or_else(mismatch)?
            .save(path)?,
        planes => return Err(HalftoneError::UnsupportedPlanes(planes)),
    }
    Ok(())
}
