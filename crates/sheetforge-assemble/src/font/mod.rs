//! Bitmap font used for row labels.

mod bitmap;
mod glyphs;

pub use bitmap::{BitmapFont, TextBounds, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
