use itertools::{Itertools, iproduct};

use crate::{
    error::{HalftoneError, Result},
    texture::Texture,
};

/// Smallest matrix the recursion bottoms out at.
///
/// > M2 = [[0, 2], [3, 1]]
pub const BAYER_BASE: [u32; 4] = [0, 2, 3, 1];

/// Constant added to `4U` for each quadrant,
/// in (top-left, top-right, bottom-left, bottom-right) order.
const QUADRANT_OFFSETS: [u32; 4] = [0, 2, 3, 1];

/// Square matrix of dispersed-dot threshold ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdMatrix {
    size: usize,
    /// row-major ranks
    ranks: Vec<u32>,
}

impl ThresholdMatrix {
    /// Build the `size x size` Bayer matrix.
    ///
    /// `size` must be a power of two. The ranks are a permutation of `0..size²`.
    /// `size == 1` yields the trivial `[[0]]`.
    pub fn bayer(size: usize) -> Result<Self> {
        if size == 0 || !size.is_power_of_two() {
            return Err(HalftoneError::InvalidSize(size));
        }
        if size == 1 {
            return Ok(Self {
                size,
                ranks: vec![0],
            });
        }
        Ok(Self::build(size))
    }

    /// Bayer matrix of the next power of two, truncated to `size x size`.
    ///
    /// Identical to [ThresholdMatrix::bayer] for powers of two. For any other size
    /// the ranks are the top-left corner of the larger matrix, so they are distinct
    /// but no longer a permutation of `0..size²`.
    pub fn fitted(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(HalftoneError::InvalidSize(size));
        }
        Ok(Self::bayer(size.next_power_of_two())?.truncate(size))
    }

    /// Recursive construction. `size >= 2`.
    ///
    /// > half = ceil(size / 2)
    /// > M(size) = [[4U, 4U + 2], [4U + 3, 4U + 1]], U = M(half)
    fn build(size: usize) -> Self {
        if size == 2 {
            return Self {
                size,
                ranks: BAYER_BASE.to_vec(),
            };
        }

        let half = size.div_ceil(2);
        let inner = Self::build(half);
        let side = 2 * half;

        let ranks = iproduct!(0..side, 0..side)
            .map(|(y, x)| {
                let quadrant = (y / half) * 2 + x / half;
                4 * inner.rank(x % half, y % half) + QUADRANT_OFFSETS[quadrant]
            })
            .collect_vec();

        Self { size: side, ranks }
    }

    /// Keep only the top-left `size x size` corner.
    ///
    /// # Panics
    /// Panics if `size` is larger than the matrix.
    pub fn truncate(&self, size: usize) -> Self {
        assert!(size <= self.size, "cannot truncate to a larger size");
        let ranks = iproduct!(0..size, 0..size)
            .map(|(y, x)| self.rank(x, y))
            .collect_vec();
        Self { size, ranks }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn rank(&self, x: usize, y: usize) -> u32 {
        self.ranks[y * self.size + x]
    }

    pub fn ranks(&self) -> &[u32] {
        &self.ranks
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.ranks.chunks(self.size.max(1))
    }

    /// Single plane texture holding the raw ranks as intensities.
    pub fn to_texture(&self) -> Texture<f64> {
        Texture::from_slice(self.size as u32, self.size as u32, 1, &self.ranks)
            .map(|&rank| rank as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_case() {
        let matrix = ThresholdMatrix::bayer(2).unwrap();
        assert_eq!(matrix.size(), 2);
        assert_eq!(matrix.ranks(), &[0, 2, 3, 1]);
    }

    #[test]
    fn test_bayer_4() {
        let matrix = ThresholdMatrix::bayer(4).unwrap();
        #[rustfmt::skip]
        let expected = [
             0,  8,  2, 10,
            12,  4, 14,  6,
             3, 11,  1,  9,
            15,  7, 13,  5,
        ];
        assert_eq!(matrix.ranks(), &expected);
    }

    #[test]
    fn test_bayer_8_quadrants() {
        let outer = ThresholdMatrix::bayer(8).unwrap();
        let inner = ThresholdMatrix::bayer(4).unwrap();
        for (y, x) in iproduct!(0..4, 0..4) {
            let u = 4 * inner.rank(x, y);
            assert_eq!(outer.rank(x, y), u);
            assert_eq!(outer.rank(x + 4, y), u + 2);
            assert_eq!(outer.rank(x, y + 4), u + 3);
            assert_eq!(outer.rank(x + 4, y + 4), u + 1);
        }
    }

    #[test]
    fn test_power_of_two_sizes_are_permutations() {
        for size in [2, 4, 8, 16, 32, 64] {
            let matrix = ThresholdMatrix::bayer(size).unwrap();
            let sorted = matrix.ranks().iter().copied().sorted().collect_vec();
            let expected = (0..(size * size) as u32).collect_vec();
            assert_eq!(sorted, expected, "size {} is not a permutation", size);
        }
    }

    #[test]
    fn test_size_one() {
        let matrix = ThresholdMatrix::bayer(1).unwrap();
        assert_eq!(matrix.ranks(), &[0]);
    }

    #[test]
    fn test_invalid_sizes() {
        for size in [0, 3, 6, 12, 100] {
            assert!(matches!(
                ThresholdMatrix::bayer(size),
                Err(HalftoneError::InvalidSize(s)) if s == size
            ));
        }
        assert!(matches!(
            ThresholdMatrix::fitted(0),
            Err(HalftoneError::InvalidSize(0))
        ));
    }

    #[test]
    fn test_fitted_truncates_next_power_of_two() {
        let fitted = ThresholdMatrix::fitted(3).unwrap();
        assert_eq!(fitted.size(), 3);
        assert_eq!(fitted.ranks(), &[0, 8, 2, 12, 4, 14, 3, 11, 1]);

        assert_eq!(
            ThresholdMatrix::fitted(16).unwrap(),
            ThresholdMatrix::bayer(16).unwrap()
        );
    }

    #[test]
    fn test_rows_and_texture() {
        let matrix = ThresholdMatrix::bayer(2).unwrap();
        let rows = matrix.rows().collect_vec();
        assert_eq!(rows, vec![&[0, 2][..], &[3, 1][..]]);

        let texture = matrix.to_texture();
        assert_eq!(texture.as_ref(), &[0.0, 2.0, 3.0, 1.0]);
    }
}
