//! SheetForge End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the assembly flows:
//!
//! - **Sheet**: frame folders -> one combined image
//! - **Strips**: frame folders -> one image per row
//! - **Images**: frame folders -> one padded image per frame
//! - **Determinism**: byte-identical output across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sheetforge-tests
//! ```
//!
//! Fixtures generate frame folders on the fly with solid-color PNGs, so the
//! tests need no checked-in assets.

pub mod determinism;
pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use determinism::{hash_file, hash_tree, verify_determinism, DeterminismResult};
pub use fixtures::FrameFolderFixture;
pub use harness::{is_blank, pixel, RecordingObserver};
