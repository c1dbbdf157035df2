//! Parameter types for assembly and pixelation.

mod assemble;
mod pixelate;

pub use assemble::{
    AssembleParam, CombineMode, HorizontalAlign, Margin, SpriteAlign, SpriteConsistency,
    VerticalAlign, DEFAULT_EXTENSION, SUPPORTED_EXTENSIONS,
};
pub use pixelate::{PixelateParam, ShrinkInterp};

#[cfg(test)]
mod tests;
