//! Per-frame image filters applied right after decoding.

use image::DynamicImage;

/// Transforms a decoded frame before it is laid out.
///
/// The assembler treats the returned image as opaque: its size feeds row
/// metrics exactly like an unfiltered frame would.
pub trait FrameFilter {
    /// Returns the filtered frame.
    fn apply(&self, frame: DynamicImage) -> DynamicImage;
}

impl<F> FrameFilter for F
where
    F: Fn(DynamicImage) -> DynamicImage,
{
    fn apply(&self, frame: DynamicImage) -> DynamicImage {
        self(frame)
    }
}
