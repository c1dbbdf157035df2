//! SheetForge CLI - Command-line interface for sprite sheet assembly
//!
//! This binary assembles rendered animation frames into sprite sheets,
//! strips or per-frame images, and pixelates single images.

use clap::Parser;
use std::process::ExitCode;

use sheetforge_cli::cli_args::{Cli, Commands};
use sheetforge_cli::{commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Assemble(args) => commands::assemble::run(&args),
        Commands::Pixelate {
            input,
            output,
            pixelation,
            json,
        } => commands::pixelate::run(&input, output.as_deref(), &pixelation.to_param(), json),
        Commands::Validate { config, json } => commands::validate::run(&config, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
