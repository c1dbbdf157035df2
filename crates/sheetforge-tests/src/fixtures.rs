//! Test fixture utilities for creating synthetic frame folders.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

/// A temporary project with an `input/` frame folder and an `output/` area.
///
/// Frames are solid-color RGBA PNGs; the color defaults to a value derived
/// from the action and frame index so every frame is distinguishable.
pub struct FrameFolderFixture {
    pub root: TempDir,
    pub input: PathBuf,
}

impl FrameFolderFixture {
    /// Creates an empty fixture.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        let input = root.path().join("input");
        fs::create_dir_all(&input).expect("Failed to create input dir");
        Self { root, input }
    }

    /// Fixture root path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// A path under the fixture root for outputs.
    pub fn output(&self, name: &str) -> PathBuf {
        self.root.path().join("output").join(name)
    }

    /// Creates an action folder `<index>_<label>` (possibly empty).
    pub fn add_action(&self, index: u32, label: &str) -> PathBuf {
        let dir = self.input.join(format!("{}_{}", index, label));
        fs::create_dir_all(&dir).expect("Failed to create action dir");
        dir
    }

    /// Writes frame `frame` of an action as a solid `color` PNG.
    pub fn add_frame_colored(
        &self,
        action: u32,
        label: &str,
        frame: u32,
        (width, height): (u32, u32),
        color: [u8; 4],
    ) -> PathBuf {
        let dir = self.add_action(action, label);
        let path = dir.join(format!("{}.png", frame));
        RgbaImage::from_pixel(width, height, Rgba(color))
            .save(&path)
            .expect("Failed to write frame");
        path
    }

    /// Writes frame `frame` of an action with its default color.
    pub fn add_frame(&self, action: u32, label: &str, frame: u32, size: (u32, u32)) -> PathBuf {
        self.add_frame_colored(action, label, frame, size, frame_color(action, frame))
    }

    /// Writes `count` frames (0..count) of the same size.
    pub fn add_frames(&self, action: u32, label: &str, count: u32, size: (u32, u32)) {
        for frame in 0..count {
            self.add_frame(action, label, frame, size);
        }
    }

    /// Writes an arbitrary file into an action folder.
    pub fn add_raw_file(&self, action: u32, label: &str, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.add_action(action, label).join(name);
        fs::write(&path, bytes).expect("Failed to write file");
        path
    }
}

impl Default for FrameFolderFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque color used for a frame by [`FrameFolderFixture::add_frame`].
pub fn frame_color(action: u32, frame: u32) -> [u8; 4] {
    [
        (40 + action * 50 % 200) as u8,
        (20 + frame * 30 % 220) as u8,
        200,
        255,
    ]
}
