//! SheetForge Parameter Library
//!
//! This crate provides the configuration types and validation for SheetForge
//! sprite sheet assembly. Parameters are plain serde structs that can be built
//! in code or loaded from a JSON config file.
//!
//! # Overview
//!
//! An assembly run is described by an [`AssembleParam`]:
//!
//! - **Input**: a folder of `<index>_<action>/<frame>.<ext>` images
//! - **Layout**: margins, label font size, consistency policy, alignment, row wrapping
//! - **Output**: a single sheet, one strip per row, or one image per frame
//!
//! # Example
//!
//! ```
//! use sheetforge_spec::{AssembleParam, CombineMode, Margin, SpriteAlign, SpriteConsistency};
//! use sheetforge_spec::validation::validate_params;
//!
//! let param = AssembleParam::new("renders", "out/sheet.png")
//!     .with_font_size(0)
//!     .with_surrounding_margin(Margin::uniform(10))
//!     .with_consistency(SpriteConsistency::Row)
//!     .with_align(SpriteAlign::BottomCenter)
//!     .with_combine_mode(CombineMode::Sheet);
//!
//! let result = validate_params(&param);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`params`]: Assembly and pixelation parameter types
//! - [`validation`]: Parameter validation functions

pub mod error;
pub mod params;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use params::{
    AssembleParam, CombineMode, HorizontalAlign, Margin, PixelateParam, ShrinkInterp,
    SpriteAlign, SpriteConsistency, VerticalAlign, DEFAULT_EXTENSION, SUPPORTED_EXTENSIONS,
};
