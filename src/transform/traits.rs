use crate::{
    error::Result,
    texture::{Texture, TextureSlice},
};

/// Core trait for applying a transform to data.
///
/// Uses associated types for Input/Output to ensure type safety when chaining.
/// The output is allocated by the transform since halftoning may change the
/// shape of the data (error diffusion keeps its guard border).
pub trait TextureTransform {
    type Input;
    type Output;

    /// Apply the transform to the input texture, producing a new texture.
    fn apply(&mut self, input: TextureSlice<'_, Self::Input>) -> Result<Texture<Self::Output>>;

    /// Apply once, consuming the transform.
    fn once(mut self, input: TextureSlice<'_, Self::Input>) -> Result<Texture<Self::Output>>
    where
        Self: Sized,
    {
        self.apply(input)
    }
}
