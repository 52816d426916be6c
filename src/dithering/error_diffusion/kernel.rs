use crate::{
    dithering::error_diffusion::{
        matrices::{FLOYD_STEINBERG, FLOYD_STEINBERG_SIZE, SINGLE_ERROR, SINGLE_ERROR_SIZE},
        padding::{GUARD_COLUMNS, GUARD_ROWS},
    },
    error::{HalftoneError, Result},
};

/// Horizontal traversal direction of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// left to right
    Forward,
    /// right to left
    Backward,
}

/// Weights spreading the quantization error of one pixel over its neighbours.
///
/// Row 0 is the current row, row 1 (if any) the row below. The weights are
/// expected to sum to 1 but this is not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionKernel {
    width: usize,
    height: usize,
    /// row-major weights
    weights: Vec<f64>,
}

impl DiffusionKernel {
    /// Validate and build a kernel.
    ///
    /// The kernel footprint has to stay inside the one pixel guard border of a
    /// padded map in both scan directions, which limits it to 3 columns and 2 rows.
    pub fn new(width: usize, height: usize, weights: &[f64]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(HalftoneError::InvalidKernel(format!(
                "empty kernel {}x{}",
                width, height
            )));
        }
        if weights.len() != width * height {
            return Err(HalftoneError::InvalidKernel(format!(
                "{}x{} kernel needs {} weights, got {}",
                width,
                height,
                width * height,
                weights.len()
            )));
        }
        if let Some(weight) = weights.iter().find(|w| !w.is_finite()) {
            return Err(HalftoneError::InvalidKernel(format!(
                "non-finite weight {}",
                weight
            )));
        }
        if height > 1 + GUARD_ROWS {
            return Err(HalftoneError::InvalidKernel(format!(
                "{} rows, at most {} fit the guard border",
                height,
                1 + GUARD_ROWS
            )));
        }

        let kernel = Self {
            width,
            height,
            weights: weights.to_vec(),
        };
        for scan in [Scan::Forward, Scan::Backward] {
            let (start, stop) = kernel.window(scan);
            if start > GUARD_COLUMNS || stop > GUARD_COLUMNS + 1 {
                return Err(HalftoneError::InvalidKernel(format!(
                    "{} columns do not fit the guard border",
                    width
                )));
            }
        }
        Ok(kernel)
    }

    /// Build from rows, which must all have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.iter().any(|row| row.as_ref().len() != width) {
            return Err(HalftoneError::InvalidKernel("ragged rows".to_string()));
        }
        let weights: Vec<f64> = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        Self::new(width, rows.len(), &weights)
    }

    /// `[[0, 1]]`
    pub fn single_error() -> Self {
        let [width, height] = SINGLE_ERROR_SIZE;
        Self {
            width,
            height,
            weights: SINGLE_ERROR.to_vec(),
        }
    }

    /// `[[0, 0, 7/16], [3/16, 5/16, 1/16]]`
    pub fn floyd_steinberg() -> Self {
        let [width, height] = FLOYD_STEINBERG_SIZE;
        Self {
            width,
            height,
            weights: FLOYD_STEINBERG.to_vec(),
        }
    }

    /// Horizontal mirror, for scanning right to left.
    pub fn mirrored(&self) -> Self {
        let weights = self
            .weights
            .chunks_exact(self.width)
            .flat_map(|row| row.iter().rev().copied())
            .collect();
        Self {
            width: self.width,
            height: self.height,
            weights,
        }
    }

    /// Columns `[x - start, x + stop)` around pixel `x` covered by the kernel.
    ///
    /// > forward:  start = ceil(K / 2) - 1, stop = floor(K / 2) + 1
    /// > backward: start = floor(K / 2),    stop = ceil(K / 2)
    #[inline]
    pub fn window(&self, scan: Scan) -> (usize, usize) {
        let k = self.width;
        match scan {
            Scan::Forward => (k.div_ceil(2) - 1, k / 2 + 1),
            Scan::Backward => (k / 2, k.div_ceil(2)),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn weight(&self, x: usize, y: usize) -> f64 {
        self.weights[y * self.width + x]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}
