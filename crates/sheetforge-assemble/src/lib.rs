//! SheetForge Frame Assembly Engine
//!
//! This crate composes folders of rendered animation frames into sprite
//! sheets. Input is a folder with one `<index>_<action>` subfolder per
//! animation, each holding `<frame>.<ext>` images. Output is one of:
//!
//! - **Sheet**: every action stacked into one image, one labeled row each
//! - **Strips**: one image per row, named after its action
//! - **Images**: one padded image per frame in `<row>_<action>/` folders
//!
//! Frames are aligned inside cells whose size follows the consistency
//! policy (per frame, per row or global), rows wrap at a maximum frame
//! count, and labels are drawn with a built-in pixel font.
//!
//! # Example
//!
//! ```no_run
//! use sheetforge_assemble::assemble;
//! use sheetforge_spec::{AssembleParam, SpriteAlign, SpriteConsistency};
//!
//! let param = AssembleParam::new("renders/knight", "out/knight.png")
//!     .with_consistency(SpriteConsistency::Row)
//!     .with_align(SpriteAlign::BottomCenter)
//!     .with_max_frames_per_row(8);
//!
//! let report = assemble(&param).unwrap();
//! for output in &report.outputs {
//!     println!("{} ({}x{})", output.path.display(), output.width, output.height);
//! }
//! ```
//!
//! # Determinism
//!
//! The same input folder and parameters always produce byte-identical
//! files: folders and frames are ordered numerically, paint order is fixed
//! and encoding is single-threaded.

pub mod align;
pub mod assemble;
pub mod compose;
pub mod error;
pub mod filter;
pub mod font;
pub mod layout;
pub mod observer;
pub mod output;
pub mod pixelate;
pub mod rows;

// Re-export main types for convenience
pub use assemble::{assemble, AssembleReport, Assembler, OutputFile};
pub use error::{AssembleError, AssembleResult, ErrorKind};
pub use filter::FrameFilter;
pub use font::{BitmapFont, TextBounds};
pub use layout::{CanvasPlan, ImagePlan, LayoutSettings};
pub use observer::{AssembleObserver, CancelToken, NoopObserver};
pub use output::{save_image, unique_path};
pub use pixelate::{pixelate, pixelate_file, Pixelate, PixelateError};
pub use rows::{RowBuilder, RowData, RowSet};
