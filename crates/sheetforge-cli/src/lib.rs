//! SheetForge CLI library.
//!
//! Argument definitions, config resolution, logging setup and the command
//! implementations behind the `sheetforge` binary.

pub mod cli_args;
pub mod commands;
pub mod config;
pub mod logging;
