//! Error diffusion over a border padded map.
//!
//! Rows are processed strictly in order, each one pushing error into the row
//! below through the shared padded buffer. After every pixel the touched cells
//! are clamped to `[0, max_intensity]`; whatever falls outside is lost.

pub mod kernel;
pub mod matrices;
pub mod padding;

use itertools::{Either, iproduct};
use tracing::{debug, trace};

use crate::{
    dithering::{
        error_diffusion::{
            kernel::{DiffusionKernel, Scan},
            padding::{GUARD_COLUMNS, Padded},
        },
        threshold::{DEFAULT_MAX_INTENSITY, DEFAULT_THRESHOLD},
    },
    error::{HalftoneError, Result},
    prelude::TextureTransform,
    texture::{Texture, TextureRef, TextureSlice},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDiffusionType {
    /// `[[0, 1]]`, every row left to right
    SingleError,
    /// `[[0, 1]]` serpentine
    BidirectionalSingleError,
    FloydSteinberg,
    /// Floyd-Steinberg serpentine
    BidirectionalFloydSteinberg,
}

impl ErrorDiffusionType {
    pub fn build(self, threshold: f64, max_intensity: f64) -> ErrorDiffusion {
        let (kernel, policy) = match self {
            Self::SingleError => (DiffusionKernel::single_error(), ScanPolicy::Unidirectional),
            Self::BidirectionalSingleError => {
                (DiffusionKernel::single_error(), ScanPolicy::Serpentine)
            }
            Self::FloydSteinberg => (
                DiffusionKernel::floyd_steinberg(),
                ScanPolicy::Unidirectional,
            ),
            Self::BidirectionalFloydSteinberg => {
                (DiffusionKernel::floyd_steinberg(), ScanPolicy::Serpentine)
            }
        };
        ErrorDiffusion::new(kernel, policy, threshold, max_intensity)
    }
}

/// Direction of each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPolicy {
    /// every row left to right
    Unidirectional,
    /// even rows left to right, odd rows right to left
    Serpentine,
}

impl ScanPolicy {
    #[inline]
    pub fn scan(self, y: usize) -> Scan {
        match self {
            ScanPolicy::Unidirectional => Scan::Forward,
            ScanPolicy::Serpentine if y % 2 == 0 => Scan::Forward,
            ScanPolicy::Serpentine => Scan::Backward,
        }
    }
}

/// What [TextureTransform::apply] returns for an [ErrorDiffusion].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BorderPolicy {
    /// Return the padded buffer, one row and two columns larger than the input.
    #[default]
    Keep,
    /// Crop back to the input shape.
    Crop,
}

#[derive(Debug, Clone)]
pub struct ErrorDiffusion {
    /// used on forward rows
    forward: DiffusionKernel,
    /// horizontal mirror of `forward`, used on backward rows
    backward: DiffusionKernel,
    policy: ScanPolicy,
    threshold: f64,
    max_intensity: f64,
    border: BorderPolicy,
}

impl Default for ErrorDiffusion {
    fn default() -> Self {
        ErrorDiffusionType::FloydSteinberg.build(DEFAULT_THRESHOLD, DEFAULT_MAX_INTENSITY)
    }
}

impl ErrorDiffusion {
    /// `kernel` is laid out for a left to right scan, backward rows use its mirror.
    pub fn new(
        kernel: DiffusionKernel,
        policy: ScanPolicy,
        threshold: f64,
        max_intensity: f64,
    ) -> Self {
        Self {
            backward: kernel.mirrored(),
            forward: kernel,
            policy,
            threshold,
            max_intensity,
            border: BorderPolicy::default(),
        }
    }

    pub fn with_border(mut self, border: BorderPolicy) -> Self {
        self.border = border;
        self
    }

    #[inline]
    fn kernel(&self, scan: Scan) -> &DiffusionKernel {
        match scan {
            Scan::Forward => &self.forward,
            Scan::Backward => &self.backward,
        }
    }

    /// Pad `map` once and diffuse every row in order.
    ///
    /// The result keeps its guard border, see [Padded::crop].
    pub fn diffuse(&self, map: TextureSlice<'_, f64>) -> Result<Padded<f64>> {
        let (width, height, planes) = map.shape();
        if planes != 1 {
            return Err(HalftoneError::ShapeMismatch {
                expected: (width, height, 1),
                found: map.shape(),
            });
        }

        debug!(
            width,
            height,
            policy = ?self.policy,
            kernel = ?self.forward.weights(),
            "diffusing error"
        );
        let mut padded = Padded::new(map);
        for y in 0..height {
            self.diffuse_row(&mut padded, y);
        }
        Ok(padded)
    }

    /// Binarize row `y` of the wrapped map and spread its error.
    ///
    /// Rows must be fed in order `0, 1, 2, ...` to reproduce [ErrorDiffusion::diffuse].
    ///
    /// # Panics
    /// Panics if `y` is not a row of the wrapped map.
    pub fn diffuse_row(&self, padded: &mut Padded<f64>, y: usize) {
        let (inner_width, inner_height) = padded.inner_shape();
        assert!(y < inner_height, "row {} outside of the padded map", y);

        let scan = self.policy.scan(y);
        let kernel = self.kernel(scan);
        let (start, _) = kernel.window(scan);
        trace!(y, ?scan, "row");

        let guarded = GUARD_COLUMNS..GUARD_COLUMNS + inner_width;
        let columns = match scan {
            Scan::Forward => Either::Left(guarded),
            Scan::Backward => Either::Right(guarded.rev()),
        };

        let texture = padded.as_texture_mut();
        for x in columns {
            let value = texture[(x, y)];
            let quantized = if value > self.threshold {
                self.max_intensity
            } else {
                0.0
            };
            let error = value - quantized;
            texture[(x, y)] = quantized;

            for (ky, kx) in iproduct!(0..kernel.height(), 0..kernel.width()) {
                let cell = &mut texture[(x - start + kx, y + ky)];
                *cell = (*cell + error * kernel.weight(kx, ky))
                    .max(0.0)
                    .min(self.max_intensity);
            }
        }
    }
}

impl TextureTransform for ErrorDiffusion {
    type Input = f64;
    type Output = f64;

    fn apply(&mut self, input: TextureSlice<'_, f64>) -> Result<Texture<f64>> {
        let padded = self.diffuse(input)?;
        match self.border {
            BorderPolicy::Keep => Ok(padded.into_texture()),
            BorderPolicy::Crop => padded.crop(),
        }
    }
}
