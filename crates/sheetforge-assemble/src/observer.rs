//! Progress notification and cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives progress events while outputs are composed.
///
/// Events fire synchronously on the assembling thread, in paint order:
/// `on_row_start`, then `on_frame_start`/`on_frame_end` for every frame of the
/// row, then `on_row_end`. All methods default to no-ops.
pub trait AssembleObserver {
    /// A row is about to be composed.
    fn on_row_start(&mut self, _row_index: usize, _label: &str, _frame_count: usize) {}

    /// A row has been composed (and, in strips mode, written).
    fn on_row_end(&mut self, _row_index: usize, _label: &str, _frame_count: usize) {}

    /// A frame is about to be painted.
    fn on_frame_start(&mut self, _row_index: usize, _label: &str, _frame_index: usize) {}

    /// A frame has been painted (and, in images mode, written).
    fn on_frame_end(&mut self, _row_index: usize, _label: &str, _frame_index: usize) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AssembleObserver for NoopObserver {}

/// Cooperative cancellation flag, checked between rows.
///
/// Clones share the same flag, so one clone can be handed to another thread
/// and cancelled from there.
#[derive(Debug, Default, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns true once `cancel` has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
