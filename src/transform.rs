pub mod gamma;
pub mod grayscale;
pub mod pipe;
pub mod traits;

pub mod prelude {
    pub use super::gamma::GammaCorrection;
    pub use super::grayscale::Grayscale;
    pub use super::pipe::{PipeableTransform, Pipeline};
    pub use super::traits::TextureTransform;
}
