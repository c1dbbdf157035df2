//! Assertion helpers and a recording observer.

use std::path::Path;

use image::{DynamicImage, GenericImageView};
use sheetforge_assemble::AssembleObserver;

/// Observer that records every event as a readable string.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<String>,
}

impl AssembleObserver for RecordingObserver {
    fn on_row_start(&mut self, row_index: usize, label: &str, frame_count: usize) {
        self.events
            .push(format!("row_start {} {} {}", row_index, label, frame_count));
    }

    fn on_row_end(&mut self, row_index: usize, label: &str, frame_count: usize) {
        self.events
            .push(format!("row_end {} {} {}", row_index, label, frame_count));
    }

    fn on_frame_start(&mut self, row_index: usize, label: &str, frame_index: usize) {
        self.events
            .push(format!("frame_start {} {} {}", row_index, label, frame_index));
    }

    fn on_frame_end(&mut self, row_index: usize, label: &str, frame_index: usize) {
        self.events
            .push(format!("frame_end {} {} {}", row_index, label, frame_index));
    }
}

/// Opens an output image, panicking with the path on failure.
pub fn open(path: &Path) -> DynamicImage {
    image::open(path).unwrap_or_else(|e| panic!("failed to open {}: {}", path.display(), e))
}

/// RGBA value of a pixel.
pub fn pixel(image: &DynamicImage, x: u32, y: u32) -> [u8; 4] {
    image.get_pixel(x, y).0
}

/// True when every pixel of the rectangle is fully zero.
pub fn is_blank(image: &DynamicImage, x: u32, y: u32, width: u32, height: u32) -> bool {
    (y..y + height).all(|py| (x..x + width).all(|px| image.get_pixel(px, py).0 == [0, 0, 0, 0]))
}
