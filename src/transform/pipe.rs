use crate::{
    error::Result,
    prelude::TextureTransform,
    texture::{Texture, TextureSlice},
};

/// Extension trait that enables pipeline chaining
pub trait PipeableTransform: TextureTransform + Sized {
    /// Chain this transform with another, creating a pipeline
    ///
    /// # Example
    /// ```ignore
    ///
    /// // Create a pipeline: RGB -> Grayscale -> Halftoned
    /// let mut pipeline = grayscale.pipe(floyd_steinberg);
    ///
    /// // Use it as a single transform
    /// let output = pipeline.apply(input.as_texture_slice())?;
    /// ```
    fn pipe<T>(self, next: T) -> Pipeline<Self, T>
    where
        T: TextureTransform<Input = Self::Output>,
    {
        Pipeline::new(self, next)
    }
}

// Blanket implementation: all TextureTransforms are automatically pipeable
impl<T: TextureTransform> PipeableTransform for T {}

/// A pipeline that chains two transforms: A -> B -> C
///
/// Exposes only A -> C, hiding the intermediate type B.
/// The intermediate texture lives only for the duration of one `apply`.
pub struct Pipeline<T1, T2> {
    t1: T1,
    t2: T2,
}

impl<T1, T2> Pipeline<T1, T2>
where
    T1: TextureTransform,
    T2: TextureTransform<Input = T1::Output>,
{
    pub fn new(t1: T1, t2: T2) -> Self {
        Self { t1, t2 }
    }
}

impl<T1, T2> TextureTransform for Pipeline<T1, T2>
where
    T1: TextureTransform,
    T2: TextureTransform<Input = T1::Output>,
{
    type Input = T1::Input;
    type Output = T2::Output;

    #[inline(always)]
    fn apply(&mut self, input: TextureSlice<'_, Self::Input>) -> Result<Texture<Self::Output>> {
        let intermediate = self.t1.apply(input)?;
        self.t2.apply(intermediate.as_texture_slice())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{HalftoneError, Result},
        prelude::{PipeableTransform, TextureTransform},
        texture::{Texture, TextureSlice},
    };

    #[test]
    fn test_pipeline_cascades_apply() {
        let input = Texture::<u8>::with_shape((4, 4, 1));

        let mut pipeline = IncTransform::default().pipe(IncTransform::default());
        let output = pipeline.apply(input.as_texture_slice()).unwrap();

        assert!(output.as_ref().iter().all(|p| *p == 2));
        assert_eq!(pipeline.t1.calls, 1);
        assert_eq!(pipeline.t2.calls, 1);
    }

    #[test]
    fn test_pipeline_stops_at_first_error() {
        let input = Texture::<u8>::with_shape((2, 2, 1));

        let mut pipeline = FailTransform.pipe(IncTransform::default());
        let result = pipeline.apply(input.as_texture_slice());

        assert!(matches!(result, Err(HalftoneError::InvalidSize(0))));
        assert_eq!(pipeline.t2.calls, 0);
    }

    #[derive(Default)]
    struct IncTransform {
        calls: usize,
    }

    impl TextureTransform for IncTransform {
        type Input = u8;
        type Output = u8;

        fn apply(&mut self, input: TextureSlice<'_, u8>) -> Result<Texture<u8>> {
            self.calls += 1;
            Ok(input.to_texture().map(|v| v + 1))
        }
    }

    struct FailTransform;

    impl TextureTransform for FailTransform {
        type Input = u8;
        type Output = u8;

        fn apply(&mut self, _: TextureSlice<'_, u8>) -> Result<Texture<u8>> {
            Err(HalftoneError::InvalidSize(0))
        }
    }
}
