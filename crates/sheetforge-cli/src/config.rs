//! Resolving assembly parameters from a config file plus command-line flags.

use anyhow::{Context, Result};
use sheetforge_spec::AssembleParam;

use crate::cli_args::AssembleArgs;

/// Loads `--config` (if any) and applies every flag that was given on top.
///
/// Without a config file the parameter defaults apply, with empty paths that
/// validation reports unless `--input`/`--output` fill them.
pub fn resolve_assemble_param(args: &AssembleArgs) -> Result<AssembleParam> {
    let base = match &args.config {
        Some(path) => AssembleParam::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => AssembleParam::new("", ""),
    };
    Ok(apply_overrides(base, args))
}

/// Applies the flags in `args` to `param`.
pub fn apply_overrides(mut param: AssembleParam, args: &AssembleArgs) -> AssembleParam {
    if let Some(input) = &args.input {
        param.input_folder_path = input.clone();
    }
    if let Some(output) = &args.output {
        param.output_path = output.clone();
    }
    if let Some(v) = args.font_size {
        param.font_size = v;
    }
    if let Some(v) = args.margin {
        param.surrounding_margin = v;
    }
    if let Some(v) = args.label_margin {
        param.label_margin = v;
    }
    if let Some(v) = args.image_margin {
        param.image_margin = v;
    }
    if let Some(v) = args.consistency {
        param.consistency = v;
    }
    if let Some(v) = args.align {
        param.align = v;
    }
    if let Some(v) = args.mode {
        param.combine_mode = v;
    }
    if let Some(v) = args.max_frames_per_row {
        param.max_frames_per_row = v;
    }
    if let Some(ext) = &args.extension {
        param.extension = ext.clone();
    }
    param
}
