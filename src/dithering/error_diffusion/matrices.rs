//! Built-in diffusion kernels, row-major, laid out for a left-to-right scan.

/// All of the error goes to the right neighbour.
pub const SINGLE_ERROR: [f64; 2] = [0.0, 1.0];
pub const SINGLE_ERROR_SIZE: [usize; 2] = [2, 1];

/// > [[0, 0, 7/16], [3/16, 5/16, 1/16]]
pub const FLOYD_STEINBERG: [f64; 6] = [0.0, 0.0, 0.4375, 0.1875, 0.3125, 0.0625];
pub const FLOYD_STEINBERG_SIZE: [usize; 2] = [3, 2];
