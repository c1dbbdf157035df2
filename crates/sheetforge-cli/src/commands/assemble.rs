//! Assemble command implementation
//!
//! Resolves parameters, validates them, and runs the frame assembler.

use anyhow::{Context, Result};
use colored::Colorize;
use sheetforge_assemble::{unique_path, AssembleObserver, Assembler, AssembleReport, Pixelate};
use sheetforge_spec::validation::validate_params;
use sheetforge_spec::{AssembleParam, CombineMode};
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{
    error_codes, print_json, AssembleOutput, JsonError, JsonWarning,
};
use super::reporting;
use crate::cli_args::AssembleArgs;
use crate::config::resolve_assemble_param;

/// Run the assemble command
///
/// # Returns
/// Exit code: 0 on success, 1 if parameters are invalid or assembly failed
pub fn run(args: &AssembleArgs) -> Result<ExitCode> {
    if args.json {
        run_json(args)
    } else {
        run_human(args)
    }
}

/// Prints a line per finished row.
struct RowPrinter;

impl AssembleObserver for RowPrinter {
    fn on_row_end(&mut self, row_index: usize, label: &str, frame_count: usize) {
        println!(
            "  {} row {} {} ({} frame{})",
            "+".green(),
            row_index,
            label,
            frame_count,
            if frame_count == 1 { "" } else { "s" }
        );
    }
}

fn run_human(args: &AssembleArgs) -> Result<ExitCode> {
    let start = Instant::now();
    let mut param = resolve_assemble_param(args)?;

    println!(
        "{} {}",
        "Assembling:".cyan().bold(),
        param.input_folder_path.display()
    );

    let validation = validate_params(&param);
    reporting::print_validation(&validation);
    if !validation.is_ok() {
        println!(
            "\n{} {} invalid parameter(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        return Ok(ExitCode::from(1));
    }

    prepare_output_path(&mut param, args.overwrite)?;
    let filter = pixelate_filter(args)?;

    let mut printer = RowPrinter;
    let report = assembler(&param, filter.as_ref(), &mut printer)
        .run()
        .with_context(|| {
            format!(
                "Failed to assemble '{}'",
                param.input_folder_path.display()
            )
        })?;

    print_report(&report);
    println!(
        "\n{} {} frame(s) in {} row(s) ({}ms)",
        "SUCCESS".green().bold(),
        report.frames,
        report.rows,
        start.elapsed().as_millis()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(args: &AssembleArgs) -> Result<ExitCode> {
    let mut param = match resolve_assemble_param(args) {
        Ok(param) => param,
        Err(e) => {
            let error = JsonError::new(error_codes::CONFIG_LOAD, format!("{:#}", e));
            print_json(&AssembleOutput::failure(vec![error], Vec::new()))?;
            return Ok(ExitCode::from(1));
        }
    };

    let validation = validate_params(&param);
    let warnings: Vec<JsonWarning> = validation.warnings.iter().map(JsonWarning::from).collect();
    if !validation.is_ok() {
        let errors = validation.errors.iter().map(JsonError::from).collect();
        print_json(&AssembleOutput::failure(errors, warnings))?;
        return Ok(ExitCode::from(1));
    }

    prepare_output_path(&mut param, args.overwrite)?;
    let filter = pixelate_filter(args)?;

    let mut silent = sheetforge_assemble::NoopObserver;
    match assembler(&param, filter.as_ref(), &mut silent).run() {
        Ok(report) => {
            print_json(&AssembleOutput::success(report, warnings))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            print_json(&AssembleOutput::failure(vec![JsonError::from(&e)], warnings))?;
            Ok(ExitCode::from(1))
        }
    }
}

fn assembler<'a>(
    param: &'a AssembleParam,
    filter: Option<&'a Pixelate>,
    observer: &'a mut dyn AssembleObserver,
) -> Assembler<'a> {
    let assembler = Assembler::new(param).with_observer(observer);
    match filter {
        Some(filter) => assembler.with_filter(filter),
        None => assembler,
    }
}

/// Picks a free sheet name unless overwriting was requested.
fn prepare_output_path(param: &mut AssembleParam, overwrite: bool) -> Result<()> {
    if param.combine_mode == CombineMode::Sheet && !overwrite {
        param.output_path = unique_path(&param.output_path)?;
    }
    Ok(())
}

fn pixelate_filter(args: &AssembleArgs) -> Result<Option<Pixelate>> {
    if !args.pixelate {
        return Ok(None);
    }
    let filter = Pixelate::new(args.pixelation.to_param())?;
    Ok(Some(filter))
}

fn print_report(report: &AssembleReport) {
    for output in &report.outputs {
        println!(
            "  {} {} ({}x{})",
            "->".dimmed(),
            output.path.display(),
            output.width,
            output.height
        );
    }
}
