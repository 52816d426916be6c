use thiserror::Error;

use crate::texture::Shape;

/// The main error type for the halftone crate
#[derive(Debug, Error)]
pub enum HalftoneError {
    /// A per-pixel threshold or input texture does not have the expected shape
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch { expected: Shape, found: Shape },

    /// Threshold matrix size is zero or not a power of two
    #[error("Invalid threshold matrix size {0}, expected a power of two")]
    InvalidSize(usize),

    /// Diffusion kernel is malformed or does not fit the guard border
    #[error("Invalid diffusion kernel: {0}")]
    InvalidKernel(String),

    /// Texture plane count not understood by the grayscale transform
    #[error("Unsupported plane count {0}, expected 1, 3 or 4")]
    UnsupportedPlanes(u32),

    #[error("Unknown mode `{0}`")]
    UnknownMode(String),

    #[error("ConfigParseError {0}")]
    Config(String),

    #[error("Config JSON error: {0}")]
    Json(#[from] json::Error),

    /// Error occurred while reading or decoding an image
    #[error("Image decode error: {0}")]
    ImageDecode(image::ImageError),

    /// Error occurred while writing or encoding an image
    #[error("Image encode error: {0}")]
    ImageEncode(image::ImageError),

    /// Error occurred during I/O operations (file read/write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for HalftoneError {
    fn from(err: image::ImageError) -> Self {
        // Distinguish between decode and encode errors based on the error kind
        match &err {
            image::ImageError::Encoding(_) => HalftoneError::ImageEncode(err),
            _ => HalftoneError::ImageDecode(err),
        }
    }
}

// Convenience type alias for Results using HalftoneError
pub type Result<T = ()> = std::result::Result<T, HalftoneError>;
