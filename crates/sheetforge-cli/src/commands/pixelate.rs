//! Pixelate command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use sheetforge_assemble::pixelate_file;
use sheetforge_spec::PixelateParam;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, JsonError, PixelateOutput};

/// Run the pixelate command
///
/// # Arguments
/// * `input` - Image to pixelate
/// * `output` - Destination (default: overwrite `input`)
/// * `param` - Pixelation settings
/// * `json_output` - Whether to output machine-readable JSON diagnostics
pub fn run(
    input: &Path,
    output: Option<&Path>,
    param: &PixelateParam,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        let result = pixelate_file(input, output, param);
        let (doc, code) = match result {
            Ok(written) => (
                PixelateOutput {
                    success: true,
                    errors: Vec::new(),
                    output: Some(written.display().to_string()),
                },
                ExitCode::SUCCESS,
            ),
            Err(e) => (
                PixelateOutput {
                    success: false,
                    errors: vec![JsonError::new(error_codes::PIXELATE, e.to_string())],
                    output: None,
                },
                ExitCode::from(1),
            ),
        };
        print_json(&doc)?;
        return Ok(code);
    }

    println!("{} {}", "Pixelating:".cyan().bold(), input.display());
    let written = pixelate_file(input, output, param)
        .with_context(|| format!("Failed to pixelate '{}'", input.display()))?;
    println!("{} {}", "SUCCESS".green().bold(), written.display());
    Ok(ExitCode::SUCCESS)
}
