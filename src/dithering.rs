use std::{fmt::Display, str::FromStr};

use rand::rngs::StdRng;
use tracing::debug;

use crate::{
    config::HalftoneConfig,
    dithering::{
        error_diffusion::{BorderPolicy, ErrorDiffusion, ErrorDiffusionType},
        threshold::{Thresholding, ordered::OrderedDithering, random::RandomDithering},
    },
    error::{HalftoneError, Result},
    prelude::TextureTransform,
    texture::{Texture, TextureSlice},
    transform::grayscale::Grayscale,
};

pub mod error_diffusion;
pub mod threshold;

/// Every named mode, in CLI order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    ToGrayscale,
    Thresholding,
    RandomDithering,
    OrderedDithering,
    ErrorDiffusion,
    BidirectionalErrorDiffusion,
    FloydSteinberg,
    BidirectionalFloydSteinberg,
}

impl Mode {
    pub const ALL: [Mode; 8] = [
        Mode::ToGrayscale,
        Mode::Thresholding,
        Mode::RandomDithering,
        Mode::OrderedDithering,
        Mode::ErrorDiffusion,
        Mode::BidirectionalErrorDiffusion,
        Mode::FloydSteinberg,
        Mode::BidirectionalFloydSteinberg,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::ToGrayscale => "to_grayscale",
            Mode::Thresholding => "thresholding",
            Mode::RandomDithering => "random_dithering",
            Mode::OrderedDithering => "ordered_dithering",
            Mode::ErrorDiffusion => "error_diffusion",
            Mode::BidirectionalErrorDiffusion => "bidirectional_error_diffusion",
            Mode::FloydSteinberg => "floyd_steinberg",
            Mode::BidirectionalFloydSteinberg => "bidirectional_floyd_steinberg",
        }
    }

    /// Error diffusion kind backing this mode, if any.
    pub fn error_diffusion(&self) -> Option<ErrorDiffusionType> {
        match self {
            Mode::ErrorDiffusion => Some(ErrorDiffusionType::SingleError),
            Mode::BidirectionalErrorDiffusion => Some(ErrorDiffusionType::BidirectionalSingleError),
            Mode::FloydSteinberg => Some(ErrorDiffusionType::FloydSteinberg),
            Mode::BidirectionalFloydSteinberg => {
                Some(ErrorDiffusionType::BidirectionalFloydSteinberg)
            }
            _ => None,
        }
    }

    /// Build the transform for this mode.
    ///
    /// Returns `impl TextureTransform` so every mode can be driven the same way
    /// while the concrete implementation stays hidden.
    pub fn build(
        self,
        config: &HalftoneConfig,
    ) -> impl TextureTransform<Input = f64, Output = f64> + use<> {
        debug!(mode = %self, "building transform");
        type I = ModeTransformImpl;
        let border = if config.crop_border {
            BorderPolicy::Crop
        } else {
            BorderPolicy::Keep
        };
        let diffusion = |kind: ErrorDiffusionType| {
            I::Diffusion(
                kind.build(config.threshold, config.max_intensity)
                    .with_border(border),
            )
        };
        match self {
            Mode::ToGrayscale => I::Grayscale(Grayscale::new(config.grayscale_weights)),
            Mode::Thresholding => {
                I::Thresholding(Thresholding::new(config.threshold, config.max_intensity))
            }
            Mode::RandomDithering => I::Random(match config.seed {
                Some(seed) => RandomDithering::seeded(seed, config.max_intensity),
                None => RandomDithering::from_os_rng(config.max_intensity),
            }),
            Mode::OrderedDithering => I::Ordered(OrderedDithering::new(
                config.box_size,
                config.max_intensity,
            )),
            Mode::ErrorDiffusion => diffusion(ErrorDiffusionType::SingleError),
            Mode::BidirectionalErrorDiffusion => {
                diffusion(ErrorDiffusionType::BidirectionalSingleError)
            }
            Mode::FloydSteinberg => diffusion(ErrorDiffusionType::FloydSteinberg),
            Mode::BidirectionalFloydSteinberg => {
                diffusion(ErrorDiffusionType::BidirectionalFloydSteinberg)
            }
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Mode {
    type Err = HalftoneError;

    fn from_str(s: &str) -> Result<Self> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| HalftoneError::UnknownMode(s.to_string()))
    }
}

/// Internal enum that wraps all possible mode implementations
///
/// This is returned as `impl TextureTransform`, so the concrete type is hidden
/// while still allowing full monomorphization
enum ModeTransformImpl {
    Grayscale(Grayscale),
    Thresholding(Thresholding),
    Random(RandomDithering<StdRng>),
    Ordered(OrderedDithering),
    Diffusion(ErrorDiffusion),
}

impl TextureTransform for ModeTransformImpl {
    type Input = f64;
    type Output = f64;

    fn apply(&mut self, input: TextureSlice<'_, f64>) -> Result<Texture<f64>> {
        match self {
            ModeTransformImpl::Grayscale(t) => t.apply(input),
            ModeTransformImpl::Thresholding(t) => t.apply(input),
            ModeTransformImpl::Random(t) => t.apply(input),
            ModeTransformImpl::Ordered(t) => t.apply(input),
            ModeTransformImpl::Diffusion(t) => t.apply(input),
        }
    }
}
