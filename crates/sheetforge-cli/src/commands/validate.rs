//! Validate command implementation
//!
//! Loads an assembly config file and reports validation errors and warnings.

use anyhow::Result;
use colored::Colorize;
use sheetforge_spec::validation::validate_params;
use sheetforge_spec::AssembleParam;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, print_json, JsonError, JsonWarning, ValidateOutput};
use super::reporting;

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(config_path: &Path, json_output: bool) -> Result<ExitCode> {
    let loaded = AssembleParam::from_file(config_path);

    if json_output {
        let output = match &loaded {
            Ok(param) => {
                let result = validate_params(param);
                ValidateOutput {
                    success: result.is_ok(),
                    errors: result.errors.iter().map(JsonError::from).collect(),
                    warnings: result.warnings.iter().map(JsonWarning::from).collect(),
                    params: Some(param.clone()),
                }
            }
            Err(e) => ValidateOutput {
                success: false,
                errors: vec![JsonError::new(
                    error_codes::CONFIG_LOAD,
                    format!("{}: {}", config_path.display(), e),
                )],
                warnings: Vec::new(),
                params: None,
            },
        };
        print_json(&output)?;
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    println!("{} {}", "Validating:".cyan().bold(), config_path.display());
    let param = match loaded {
        Ok(param) => param,
        Err(e) => {
            println!("  {} {}", "x".red(), e);
            println!("\n{} config could not be loaded", "FAILED".red().bold());
            return Ok(ExitCode::from(1));
        }
    };

    let result = validate_params(&param);
    reporting::print_validation(&result);

    if result.is_ok() {
        println!(
            "\n{} Config is valid ({} mode, {} warning(s))",
            "SUCCESS".green().bold(),
            param.combine_mode,
            result.warnings.len()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Config has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}
