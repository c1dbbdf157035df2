//! Label rendering with a hardcoded 5x7 pixel font.
//!
//! Glyphs are scaled by an integer factor derived from the requested font
//! size, so labels stay crisp on pixel-art sheets. Lowercase letters render
//! with their uppercase glyph; characters outside the table render blank.
//!
//! Text measurement returns the ink bounding box relative to the drawing
//! origin, the same contract as a TrueType `getbbox`: callers subtract
//! `left`/`top` from the paint position so that ink lands exactly where the
//! layout reserved space for it.

use image::{DynamicImage, GenericImage, Rgba};

use super::glyphs::{FIRST_CHAR, FONT_5X7};

/// Glyph width in pixels at scale 1.
pub const GLYPH_WIDTH: u32 = 5;

/// Glyph height in pixels at scale 1.
pub const GLYPH_HEIGHT: u32 = 7;

/// Horizontal distance between glyph origins at scale 1.
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Ink bounding box of a piece of text, relative to its drawing origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl TextBounds {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// A scaled instance of the 5x7 font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    scale: u32,
}

impl BitmapFont {
    /// Returns the font for a pixel size, or `None` when labels are disabled (size 0).
    ///
    /// The scale is `font_size / 7`, truncated, and at least 1.
    pub fn for_size(font_size: u32) -> Option<Self> {
        if font_size == 0 {
            return None;
        }
        Some(Self {
            scale: (font_size / GLYPH_HEIGHT).max(1),
        })
    }

    /// Integer scale factor applied to every glyph pixel.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Measures the ink bounding box of `text`.
    pub fn measure(&self, text: &str) -> TextBounds {
        let mut bounds: Option<TextBounds> = None;

        self.for_each_block(text, |x, y| {
            let (right, bottom) = (x + self.scale, y + self.scale);
            bounds = Some(match bounds {
                None => TextBounds {
                    left: x,
                    top: y,
                    right,
                    bottom,
                },
                Some(b) => TextBounds {
                    left: b.left.min(x),
                    top: b.top.min(y),
                    right: b.right.max(right),
                    bottom: b.bottom.max(bottom),
                },
            });
        });

        bounds.unwrap_or_default()
    }

    /// Draws `text` with its glyph origin at (`x`, `y`). Pixels outside the canvas are clipped.
    pub fn draw(&self, canvas: &mut DynamicImage, x: i64, y: i64, text: &str, color: Rgba<u8>) {
        let (width, height) = (i64::from(canvas.width()), i64::from(canvas.height()));
        let scale = i64::from(self.scale);

        self.for_each_block(text, |bx, by| {
            let (bx, by) = (x + i64::from(bx), y + i64::from(by));
            for py in by.max(0)..(by + scale).min(height) {
                for px in bx.max(0)..(bx + scale).min(width) {
                    canvas.put_pixel(px as u32, py as u32, color);
                }
            }
        });
    }

    /// Calls `f` with the top-left corner of every lit `scale`x`scale` block.
    fn for_each_block(&self, text: &str, mut f: impl FnMut(u32, u32)) {
        for (index, c) in text.chars().enumerate() {
            let Some(rows) = glyph_rows(c) else {
                continue;
            };
            let origin_x = index as u32 * GLYPH_ADVANCE * self.scale;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        f(origin_x + col * self.scale, row as u32 * self.scale);
                    }
                }
            }
        }
    }
}

fn glyph_rows(c: char) -> Option<&'static [u8; 7]> {
    let code = u32::from(c.to_ascii_uppercase());
    let index = code.checked_sub(FIRST_CHAR)? as usize;
    FONT_5X7.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_disabled_at_zero() {
        assert!(BitmapFont::for_size(0).is_none());
    }

    #[test]
    fn test_scale_from_size() {
        assert_eq!(BitmapFont::for_size(1).unwrap().scale(), 1);
        assert_eq!(BitmapFont::for_size(7).unwrap().scale(), 1);
        assert_eq!(BitmapFont::for_size(24).unwrap().scale(), 3);
        assert_eq!(BitmapFont::for_size(28).unwrap().scale(), 4);
    }

    #[test]
    fn test_measure_empty_and_blank_text() {
        let font = BitmapFont::for_size(14).unwrap();
        assert_eq!(font.measure(""), TextBounds::default());
        assert!(font.measure("   ").is_empty());
    }

    #[test]
    fn test_measure_single_glyph() {
        // 'A' spans all 5 columns and all 7 rows.
        let font = BitmapFont::for_size(7).unwrap();
        let bounds = font.measure("A");
        assert_eq!(
            bounds,
            TextBounds {
                left: 0,
                top: 0,
                right: 5,
                bottom: 7
            }
        );
    }

    #[test]
    fn test_measure_reports_top_offset() {
        // '-' only lights row 3.
        let font = BitmapFont::for_size(14).unwrap();
        let bounds = font.measure("-");
        assert_eq!(bounds.top, 6);
        assert_eq!(bounds.height(), 2);
        assert_eq!(bounds.width(), 10);
    }

    #[test]
    fn test_measure_multiple_glyphs_uses_advance() {
        let font = BitmapFont::for_size(7).unwrap();
        let bounds = font.measure("AA");
        assert_eq!(bounds.width(), GLYPH_ADVANCE + GLYPH_WIDTH);
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        let font = BitmapFont::for_size(21).unwrap();
        assert_eq!(font.measure("walk"), font.measure("WALK"));
    }

    #[test]
    fn test_draw_paints_inside_measured_bounds() {
        let font = BitmapFont::for_size(14).unwrap();
        let bounds = font.measure("Hi");
        let mut canvas = DynamicImage::new_rgba8(40, 20);
        let white = Rgba([255, 255, 255, 255]);
        font.draw(&mut canvas, 3, 2, "Hi", white);

        let rgba = canvas.to_rgba8();
        let mut lit = 0;
        for (x, y, px) in rgba.enumerate_pixels() {
            if px.0[3] != 0 {
                lit += 1;
                assert!(x >= 3 + bounds.left && x < 3 + bounds.right);
                assert!(y >= 2 + bounds.top && y < 2 + bounds.bottom);
            }
        }
        assert!(lit > 0);
    }

    #[test]
    fn test_draw_clips_to_canvas() {
        let font = BitmapFont::for_size(7).unwrap();
        let mut canvas = DynamicImage::new_rgb8(3, 3);
        font.draw(&mut canvas, -2, -2, "WW", Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.width(), 3);
    }
}
