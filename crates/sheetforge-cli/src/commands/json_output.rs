//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json` and then prints exactly one of these
//! documents to stdout. Logs still go to stderr.

use serde::Serialize;
use sheetforge_assemble::{AssembleError, AssembleReport};
use sheetforge_spec::{AssembleParam, ValidationError, ValidationWarning};

/// Error codes for CLI-level failures.
///
/// Validation errors pass through their `E0xx` codes and assembly errors
/// their `A0xx` codes.
pub mod error_codes {
    /// Config file could not be read or parsed
    pub const CONFIG_LOAD: &str = "CLI_001";
    /// Pixelation failed
    pub const PIXELATE: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001", "A002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

impl From<&ValidationError> for JsonError {
    fn from(e: &ValidationError) -> Self {
        Self {
            code: e.code.code().to_string(),
            message: e.message.clone(),
            path: e.path.clone(),
        }
    }
}

impl From<&AssembleError> for JsonError {
    fn from(e: &AssembleError) -> Self {
        Self::new(e.kind().code(), e.to_string())
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Field path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&ValidationWarning> for JsonWarning {
    fn from(w: &ValidationWarning) -> Self {
        Self {
            code: w.code.code().to_string(),
            message: w.message.clone(),
            path: w.path.clone(),
        }
    }
}

/// JSON output for the `assemble` command.
#[derive(Debug, Clone, Serialize)]
pub struct AssembleOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    /// What was written (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AssembleReport>,
}

impl AssembleOutput {
    pub fn success(report: AssembleReport, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            report: Some(report),
        }
    }

    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            report: None,
        }
    }
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    /// The parameters with defaults filled in (when the config parsed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<AssembleParam>,
}

/// JSON output for the `pixelate` command.
#[derive(Debug, Clone, Serialize)]
pub struct PixelateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    /// Path written (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Serializes `value` as pretty JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetforge_spec::{ErrorCode, WarningCode};

    #[test]
    fn test_validation_error_keeps_code_and_path() {
        let err = ValidationError::with_path(ErrorCode::EmptyInputPath, "missing", "input_folder_path");
        let json = JsonError::from(&err);
        assert_eq!(json.code, "E001");
        assert_eq!(json.path.as_deref(), Some("input_folder_path"));
    }

    #[test]
    fn test_assemble_error_uses_kind_code() {
        let json = JsonError::from(&AssembleError::Cancelled);
        assert_eq!(json.code, "A005");
    }

    #[test]
    fn test_failure_omits_report() {
        let warning = ValidationWarning::new(WarningCode::SingleFramePerRow, "one frame per row");
        let output = AssembleOutput::failure(
            vec![JsonError::new(error_codes::CONFIG_LOAD, "nope")],
            vec![JsonWarning::from(&warning)],
        );
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("report").is_none());
        assert_eq!(value["warnings"][0]["code"], "W002");
        assert!(value["warnings"][0].get("path").is_none());
    }
}
