//! Alignment of a frame inside its cell.

use sheetforge_spec::{HorizontalAlign, SpriteAlign, VerticalAlign};

/// Offset of a `content` box placed inside a `container` box with `align`.
///
/// Centered offsets are truncated toward zero. When the content is larger
/// than the container on an axis, the offset on that axis is 0.
///
/// ```
/// use sheetforge_assemble::align::offset;
/// use sheetforge_spec::SpriteAlign;
///
/// assert_eq!(offset(SpriteAlign::MiddleCenter, 10, 10, 4, 4), (3, 3));
/// assert_eq!(offset(SpriteAlign::BottomRight, 10, 8, 4, 4), (6, 4));
/// ```
pub fn offset(
    align: SpriteAlign,
    container_width: u32,
    container_height: u32,
    content_width: u32,
    content_height: u32,
) -> (u32, u32) {
    let free_x = container_width.saturating_sub(content_width);
    let free_y = container_height.saturating_sub(content_height);

    let dx = match align.horizontal() {
        HorizontalAlign::Left => 0,
        HorizontalAlign::Center => free_x / 2,
        HorizontalAlign::Right => free_x,
    };
    let dy = match align.vertical() {
        VerticalAlign::Top => 0,
        VerticalAlign::Middle => free_y / 2,
        VerticalAlign::Bottom => free_y,
    };

    (dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_stay_inside_free_space() {
        let sizes = [(10, 10, 4, 4), (7, 3, 2, 3), (64, 96, 64, 64), (5, 5, 5, 5)];
        for align in SpriteAlign::ALL {
            for (cw, ch, w, h) in sizes {
                let (dx, dy) = offset(align, cw, ch, w, h);
                assert!(dx <= cw - w, "{align} dx={dx} for {cw}x{ch} / {w}x{h}");
                assert!(dy <= ch - h, "{align} dy={dy} for {cw}x{ch} / {w}x{h}");
            }
        }
    }

    #[test]
    fn test_documented_examples() {
        assert_eq!(offset(SpriteAlign::MiddleCenter, 10, 10, 4, 4), (3, 3));
        assert_eq!(offset(SpriteAlign::BottomRight, 10, 8, 4, 4), (6, 4));
    }

    #[test]
    fn test_center_truncates() {
        assert_eq!(offset(SpriteAlign::TopCenter, 7, 0, 2, 0), (2, 0));
        assert_eq!(offset(SpriteAlign::MiddleLeft, 0, 9, 0, 4), (0, 2));
    }

    #[test]
    fn test_each_corner() {
        assert_eq!(offset(SpriteAlign::TopLeft, 20, 10, 4, 2), (0, 0));
        assert_eq!(offset(SpriteAlign::TopRight, 20, 10, 4, 2), (16, 0));
        assert_eq!(offset(SpriteAlign::BottomLeft, 20, 10, 4, 2), (0, 8));
        assert_eq!(offset(SpriteAlign::BottomCenter, 20, 10, 4, 2), (8, 8));
    }

    #[test]
    fn test_oversized_content_saturates() {
        assert_eq!(offset(SpriteAlign::BottomRight, 4, 4, 10, 10), (0, 0));
    }
}
