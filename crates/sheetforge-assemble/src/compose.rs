//! Painting planned layouts onto canvases.

use image::{imageops, ColorType, DynamicImage, Rgba};
use tracing::debug;

use crate::error::{AssembleError, AssembleResult};
use crate::font::BitmapFont;
use crate::layout::{CanvasPlan, ImagePlan};
use crate::observer::{AssembleObserver, CancelToken};
use crate::rows::RowSet;

/// Label text color.
pub const LABEL_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Allocates a zero-filled canvas; RGBA8 when no pixel layout is known.
pub fn new_canvas(width: u32, height: u32, color: Option<ColorType>) -> DynamicImage {
    DynamicImage::new(width, height, color.unwrap_or(ColorType::Rgba8))
}

/// Copies `frame` onto `canvas` at (`x`, `y`), replacing pixels (no blending).
///
/// The frame is converted to the canvas pixel layout first. Parts outside
/// the canvas are clipped.
pub fn paste(canvas: &mut DynamicImage, frame: &DynamicImage, x: u32, y: u32) {
    let (x, y) = (i64::from(x), i64::from(y));
    match canvas {
        DynamicImage::ImageLuma8(c) => imageops::replace(c, &frame.to_luma8(), x, y),
        DynamicImage::ImageLumaA8(c) => imageops::replace(c, &frame.to_luma_alpha8(), x, y),
        DynamicImage::ImageRgb8(c) => imageops::replace(c, &frame.to_rgb8(), x, y),
        DynamicImage::ImageRgba8(c) => imageops::replace(c, &frame.to_rgba8(), x, y),
        DynamicImage::ImageLuma16(c) => imageops::replace(c, &frame.to_luma16(), x, y),
        DynamicImage::ImageLumaA16(c) => imageops::replace(c, &frame.to_luma_alpha16(), x, y),
        DynamicImage::ImageRgb16(c) => imageops::replace(c, &frame.to_rgb16(), x, y),
        DynamicImage::ImageRgba16(c) => imageops::replace(c, &frame.to_rgba16(), x, y),
        DynamicImage::ImageRgb32F(c) => imageops::replace(c, &frame.to_rgb32f(), x, y),
        DynamicImage::ImageRgba32F(c) => imageops::replace(c, &frame.to_rgba32f(), x, y),
        _ => {
            let mut rgba = canvas.to_rgba8();
            imageops::replace(&mut rgba, &frame.to_rgba8(), x, y);
            *canvas = DynamicImage::ImageRgba8(rgba);
        }
    }
}

/// Paints a sheet or strip plan: labels first, then frames left to right.
///
/// `cancel` is checked before each row; observer events fire in paint order.
pub fn render_canvas(
    plan: &CanvasPlan,
    set: &RowSet,
    color: Option<ColorType>,
    font: Option<BitmapFont>,
    observer: &mut dyn AssembleObserver,
    cancel: Option<&CancelToken>,
) -> AssembleResult<DynamicImage> {
    let mut canvas = new_canvas(plan.width, plan.height, color);

    for placement in &plan.rows {
        if cancel.is_some_and(|c| c.is_cancelled()) {
            return Err(AssembleError::Cancelled);
        }

        let row = &set.rows[placement.row_index];
        let label = row.action_label.as_str();
        observer.on_row_start(placement.row_index, label, row.images.len());

        if let (Some(font), Some(at)) = (font, placement.label) {
            font.draw(&mut canvas, at.x, at.y, &row.label_text, LABEL_COLOR);
        }

        for frame in &placement.frames {
            observer.on_frame_start(placement.row_index, label, frame.frame_index);
            paste(&mut canvas, &row.images[frame.frame_index], frame.x, frame.y);
            debug!(
                row = placement.row_index,
                frame = frame.frame_index,
                x = frame.x,
                y = frame.y,
                "pasted frame"
            );
            observer.on_frame_end(placement.row_index, label, frame.frame_index);
        }

        observer.on_row_end(placement.row_index, label, row.images.len());
    }

    Ok(canvas)
}

/// Paints one frame onto its own padded canvas, keeping the frame's pixel layout.
pub fn render_image(plan: &ImagePlan, frame: &DynamicImage) -> DynamicImage {
    let mut canvas = new_canvas(plan.width, plan.height, Some(frame.color()));
    paste(&mut canvas, frame, plan.x, plan.y);
    canvas
}
