//! Parameter validation logic.

use std::path::Path;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::params::{AssembleParam, CombineMode, PixelateParam, SUPPORTED_EXTENSIONS};

/// Height in pixels of one label glyph cell at scale 1.
pub const GLYPH_CELL_HEIGHT: u32 = 7;

/// Validates assembly parameters and returns a validation result.
///
/// Checks only what can be known without touching the filesystem; the
/// assembler reports missing or malformed input folders itself.
///
/// # Example
/// ```
/// use sheetforge_spec::AssembleParam;
/// use sheetforge_spec::validation::validate_params;
///
/// let result = validate_params(&AssembleParam::new("renders", "sheet.png"));
/// assert!(result.is_ok());
///
/// let result = validate_params(&AssembleParam::new("", "sheet.png"));
/// assert!(!result.is_ok());
/// ```
pub fn validate_params(param: &AssembleParam) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_paths(param, &mut result);
    validate_extension(param, &mut result);
    check_warnings(param, &mut result);

    result
}

/// Validates pixelation parameters.
pub fn validate_pixelate_params(param: &PixelateParam) -> ValidationResult {
    let mut result = ValidationResult::default();

    let unit_ranges = [
        ("pixelation_amount", param.pixelation_amount, true),
        ("min_alpha", param.min_alpha, false),
        ("alpha_step", param.alpha_step, false),
    ];
    for (field, value, exclusive_max) in unit_ranges {
        let in_range = if exclusive_max {
            (0.0..1.0).contains(&value)
        } else {
            (0.0..=1.0).contains(&value)
        };
        if !in_range {
            let bound = if exclusive_max { "[0, 1)" } else { "[0, 1]" };
            result.add_error(ValidationError::with_path(
                ErrorCode::PixelateOutOfRange,
                format!("{} must be in {}, got {}", field, bound, value),
                field,
            ));
        }
    }

    if !param.color_amount.is_finite() || param.color_amount < 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::PixelateOutOfRange,
            format!(
                "color_amount must be a non-negative number, got {}",
                param.color_amount
            ),
            "color_amount",
        ));
    }

    result
}

/// Returns true if `ext` (without the dot) is a supported output extension.
pub fn is_supported_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}

fn validate_paths(param: &AssembleParam, result: &mut ValidationResult) {
    if param.input_folder_path.as_os_str().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyInputPath,
            "input folder path must not be empty",
            "input_folder_path",
        ));
    }

    if param.output_path.as_os_str().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyOutputPath,
            "output path must not be empty",
            "output_path",
        ));
        return;
    }

    if param.combine_mode == CombineMode::Sheet {
        let has_image_ext = extension_of(&param.output_path)
            .map(is_supported_extension)
            .unwrap_or(false);
        if !has_image_ext {
            result.add_error(ValidationError::with_path(
                ErrorCode::SheetOutputExtension,
                format!(
                    "sheet output '{}' must end in one of: {}",
                    param.output_path.display(),
                    SUPPORTED_EXTENSIONS.join(", ")
                ),
                "output_path",
            ));
        }
    }
}

fn validate_extension(param: &AssembleParam, result: &mut ValidationResult) {
    if param.combine_mode == CombineMode::Sheet {
        return;
    }
    let ext = param.extension.trim_start_matches('.');
    if !is_supported_extension(ext) {
        result.add_error(ValidationError::with_path(
            ErrorCode::UnsupportedExtension,
            format!("extension '{}' is not supported", param.extension),
            "extension",
        ));
    }
}

fn check_warnings(param: &AssembleParam, result: &mut ValidationResult) {
    if param.font_size != 0 && param.font_size < GLYPH_CELL_HEIGHT {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::FontBelowGlyphSize,
            format!(
                "font size {} is below the {}px glyph cell; labels render at scale 1",
                param.font_size, GLYPH_CELL_HEIGHT
            ),
            "font_size",
        ));
    }

    if param.combine_mode == CombineMode::Sheet && param.max_frames_per_row == 1 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::SingleFramePerRow,
            "max_frames_per_row is 1; every frame gets its own row",
            "max_frames_per_row",
        ));
    }
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
