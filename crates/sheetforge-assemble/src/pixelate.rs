//! Pixel-art stylization: shrink, color quantization and alpha stepping.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, RgbaImage};
use sheetforge_spec::validation::validate_pixelate_params;
use sheetforge_spec::{PixelateParam, ShrinkInterp};
use thiserror::Error;
use tracing::info;

use crate::error::AssembleError;
use crate::filter::FrameFilter;
use crate::output::save_image;

/// Errors from standalone pixelation.
#[derive(Debug, Error)]
pub enum PixelateError {
    #[error("invalid pixelation parameters: {0}")]
    InvalidParams(String),

    #[error("failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Output(#[from] AssembleError),
}

/// The pixelation filter as a [`FrameFilter`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pixelate {
    param: PixelateParam,
}

impl Pixelate {
    /// Creates a filter, rejecting out-of-range parameters.
    pub fn new(param: PixelateParam) -> Result<Self, PixelateError> {
        check_params(&param)?;
        Ok(Self { param })
    }

    pub fn param(&self) -> &PixelateParam {
        &self.param
    }
}

impl FrameFilter for Pixelate {
    fn apply(&self, frame: DynamicImage) -> DynamicImage {
        pixelate(&frame, &self.param)
    }
}

/// Pixelates `image`. The result is 8-bit RGBA.
///
/// The image is shrunk to `1 - pixelation_amount` of its size on each axis,
/// color channels are quantized to `color_amount` levels, and alpha is
/// stepped down to a multiple of `alpha_step` and cleared below `min_alpha`.
pub fn pixelate(image: &DynamicImage, param: &PixelateParam) -> DynamicImage {
    let keep = (1.0 - param.pixelation_amount).clamp(0.0, 1.0);
    let width = scaled_dimension(image.width(), keep);
    let height = scaled_dimension(image.height(), keep);

    let mut small: RgbaImage = image
        .resize_exact(width, height, filter_type(param.shrink_interp))
        .to_rgba8();

    for pixel in small.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = [
            quantize(r, param.color_amount),
            quantize(g, param.color_amount),
            quantize(b, param.color_amount),
            step_alpha(a, param.alpha_step, param.min_alpha),
        ];
    }

    DynamicImage::ImageRgba8(small)
}

/// Pixelates the image at `input` and writes it to `output` (or back over `input`).
///
/// Returns the path written.
pub fn pixelate_file(
    input: &Path,
    output: Option<&Path>,
    param: &PixelateParam,
) -> Result<PathBuf, PixelateError> {
    check_params(param)?;

    let decode = || -> image::ImageResult<DynamicImage> {
        ImageReader::open(input)?.with_guessed_format()?.decode()
    };
    let image = decode().map_err(|source| PixelateError::ImageLoad {
        path: input.to_path_buf(),
        source,
    })?;

    let output = output.unwrap_or(input).to_path_buf();
    let pixelated = pixelate(&image, param);
    save_image(&pixelated, &output)?;

    info!(
        "Pixelated '{}' ({}x{} -> {}x{}) into '{}'",
        input.display(),
        image.width(),
        image.height(),
        pixelated.width(),
        pixelated.height(),
        output.display()
    );
    Ok(output)
}

fn check_params(param: &PixelateParam) -> Result<(), PixelateError> {
    let result = validate_pixelate_params(param);
    if result.is_ok() {
        return Ok(());
    }
    let messages: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
    Err(PixelateError::InvalidParams(messages.join("; ")))
}

fn scaled_dimension(size: u32, keep: f64) -> u32 {
    // 1.0 - 0.9 is slightly below 0.1; nudge before flooring.
    ((f64::from(size) * keep + 1e-9).floor() as u32).max(1)
}

fn filter_type(interp: ShrinkInterp) -> FilterType {
    match interp {
        ShrinkInterp::Nearest => FilterType::Nearest,
        ShrinkInterp::Bilinear => FilterType::Triangle,
        ShrinkInterp::Bicubic => FilterType::CatmullRom,
    }
}

fn quantize(channel: u8, levels: f64) -> u8 {
    if levels <= 0.0 {
        return channel;
    }
    let c = f64::from(channel) / 255.0;
    let q = (c * levels).round() / levels;
    to_u8(q)
}

fn step_alpha(alpha: u8, step: f64, min_alpha: f64) -> u8 {
    let mut a = f64::from(alpha) / 255.0;
    if step > 0.0 {
        // Small epsilon so exact multiples are not floored one step down.
        a = ((a / step) + 1e-9).floor() * step;
    }
    if a < min_alpha {
        return 0;
    }
    to_u8(a)
}

fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
