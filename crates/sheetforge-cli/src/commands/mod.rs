//! CLI command implementations

pub mod assemble;
pub mod json_output;
pub mod pixelate;
pub mod validate;

mod reporting;
