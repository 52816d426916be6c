use std::{fmt::Display, hint::black_box};

use criterion::{BenchmarkGroup, BenchmarkId, measurement::WallTime};
use halftone::{prelude::TextureTransform, texture::Texture};
use rand::{Rng, SeedableRng, rngs::StdRng};

pub const BENCH_IMAGE_SIZES: [u32; 3] = [64, 256, 512];

pub fn gen_random_map(size: u32) -> Texture<f64> {
    let mut rng = StdRng::seed_from_u64(size as u64);
    Texture::<f64>::new(size, size, 1).map(|_| rng.random_range(0.0..=255.0))
}

pub fn bench_transform<T: Display>(
    group: &mut BenchmarkGroup<'_, WallTime>,
    id: BenchmarkId,
    param: T,
    transform: &mut impl TextureTransform<Input = f64, Output = f64>,
    input: &Texture<f64>,
) {
    group.bench_with_input(id, &param, |b, _| {
        b.iter(|| {
            let res = transform.apply(black_box(input.as_texture_slice()));
            black_box(res)
        });
    });
}
