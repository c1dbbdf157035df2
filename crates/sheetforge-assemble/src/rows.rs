//! Row building: folder scan, frame loading and row wrapping.
//!
//! The input folder holds one subfolder per action named `<index>_<label>`,
//! each containing frames named `<index>.<ext>`. Both levels are ordered by
//! their integer index (not lexically), so `10_Run` follows `2_Walk` and
//! `10.png` follows `9.png`.
//!
//! Every action is split into rows of at most `max_frames_per_row` frames.
//! Only the first row of an action carries its label; continuation rows have
//! an empty label and zero label metrics.

use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, ImageReader};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{AssembleError, AssembleResult};
use crate::filter::FrameFilter;
use crate::font::{BitmapFont, TextBounds};
use crate::observer::CancelToken;

/// An action subfolder discovered in the input folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionFolder {
    /// Integer prefix of the folder name.
    pub index: i64,
    /// Folder name with the `<index>_` prefix stripped.
    pub label: String,
    pub path: PathBuf,
}

/// One row of frames: a whole action, or one wrapped chunk of it.
#[derive(Debug, Clone)]
pub struct RowData {
    /// Label of the action this row belongs to, on every chunk.
    pub action_label: String,
    /// Position of the row's chunk within its action.
    pub chunk_index: usize,
    /// Drawn label; empty for continuation chunks.
    pub label_text: String,
    pub label_width: u32,
    pub label_height: u32,
    /// Ink bounding-box origin of the label; its `y` is subtracted from the paint position.
    pub label_offset: (u32, u32),
    /// Label height reserved above the cells: the action's label height on every chunk.
    pub label_block_height: u32,
    /// Frames in order.
    pub images: Vec<DynamicImage>,
    /// Sum of all frame widths.
    pub img_accum_width: u32,
    pub img_widest: u32,
    pub img_tallest: u32,
}

impl RowData {
    /// Creates a row and computes its frame metrics.
    pub fn new(
        action_label: impl Into<String>,
        chunk_index: usize,
        label_text: impl Into<String>,
        label_bounds: TextBounds,
        images: Vec<DynamicImage>,
    ) -> Self {
        let img_accum_width = images.iter().map(|img| img.width()).sum();
        let img_widest = images.iter().map(|img| img.width()).max().unwrap_or(0);
        let img_tallest = images.iter().map(|img| img.height()).max().unwrap_or(0);

        Self {
            action_label: action_label.into(),
            chunk_index,
            label_text: label_text.into(),
            label_width: label_bounds.width(),
            label_height: label_bounds.height(),
            label_offset: (label_bounds.left, label_bounds.top),
            label_block_height: label_bounds.height(),
            images,
            img_accum_width,
            img_widest,
            img_tallest,
        }
    }

    /// Reserves `height` for the label block even when this row draws no text.
    pub fn with_label_block_height(mut self, height: u32) -> Self {
        self.label_block_height = height;
        self
    }

    /// True when this row draws a label.
    pub fn has_label(&self) -> bool {
        !self.label_text.is_empty()
    }
}

/// All rows of one assembly run plus the global frame extents.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    pub rows: Vec<RowData>,
    pub global_img_widest: u32,
    pub global_img_tallest: u32,
}

impl RowSet {
    /// Builds a row set from rows, computing the global extents.
    pub fn from_rows(rows: Vec<RowData>) -> Self {
        let global_img_widest = rows.iter().map(|r| r.img_widest).max().unwrap_or(0);
        let global_img_tallest = rows.iter().map(|r| r.img_tallest).max().unwrap_or(0);
        Self {
            rows,
            global_img_widest,
            global_img_tallest,
        }
    }

    /// Total number of frames across all rows.
    pub fn frame_count(&self) -> usize {
        self.rows.iter().map(|r| r.images.len()).sum()
    }

    /// Pixel layout of the first frame in row order, if any.
    pub fn first_color(&self) -> Option<ColorType> {
        self.rows
            .iter()
            .flat_map(|r| r.images.first())
            .next()
            .map(|img| img.color())
    }
}

/// Loads frames from an input folder and groups them into rows.
pub struct RowBuilder<'a> {
    max_frames_per_row: u32,
    font: Option<BitmapFont>,
    filter: Option<&'a dyn FrameFilter>,
    cancel: Option<&'a CancelToken>,
}

impl<'a> RowBuilder<'a> {
    /// Creates a builder; `font_size` 0 skips label measurement.
    pub fn new(max_frames_per_row: u32, font_size: u32) -> Self {
        Self {
            max_frames_per_row,
            font: BitmapFont::for_size(font_size),
            filter: None,
            cancel: None,
        }
    }

    /// Applies `filter` to every frame right after decoding.
    pub fn with_filter(mut self, filter: &'a dyn FrameFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Checks `cancel` between action folders.
    pub fn with_cancel(mut self, cancel: &'a CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Scans `input`, loads every frame and returns the rows in order.
    pub fn build(&self, input: &Path) -> AssembleResult<RowSet> {
        let actions = scan_action_folders(input)?;
        if actions.is_empty() {
            return Err(AssembleError::configuration(format!(
                "input folder '{}' contains no action subfolders",
                input.display()
            )));
        }
        info!(
            "Found {} action folder(s) in '{}'",
            actions.len(),
            input.display()
        );

        let mut rows = Vec::new();
        for action in &actions {
            if self.cancel.is_some_and(|c| c.is_cancelled()) {
                return Err(AssembleError::Cancelled);
            }
            rows.extend(self.build_action(action)?);
        }

        let set = RowSet::from_rows(rows);
        debug!(
            rows = set.rows.len(),
            frames = set.frame_count(),
            widest = set.global_img_widest,
            tallest = set.global_img_tallest,
            "rows built"
        );
        Ok(set)
    }

    fn build_action(&self, action: &ActionFolder) -> AssembleResult<Vec<RowData>> {
        let frame_files = scan_frame_files(&action.path)?;
        if frame_files.is_empty() {
            warn!(
                "Action folder '{}' has no frames, skipping",
                action.path.display()
            );
            return Ok(Vec::new());
        }

        let mut images = Vec::with_capacity(frame_files.len());
        for (_, path) in &frame_files {
            let image = load_frame(path)?;
            let image = match self.filter {
                Some(filter) => filter.apply(image),
                None => image,
            };
            images.push(image);
        }

        let label_bounds = self
            .font
            .map(|font| font.measure(&action.label))
            .unwrap_or_default();

        let chunk_size = match self.max_frames_per_row {
            0 => images.len(),
            n => n as usize,
        };

        let mut rows = Vec::new();
        let mut remaining = images.into_iter().peekable();
        while remaining.peek().is_some() {
            let chunk: Vec<_> = remaining.by_ref().take(chunk_size).collect();
            let chunk_index = rows.len();
            let (label_text, bounds) = if chunk_index == 0 {
                (action.label.as_str(), label_bounds)
            } else {
                ("", TextBounds::default())
            };
            rows.push(
                RowData::new(action.label.clone(), chunk_index, label_text, bounds, chunk)
                    .with_label_block_height(label_bounds.height()),
            );
        }

        debug!(
            action = %action.label,
            frames = frame_files.len(),
            rows = rows.len(),
            "loaded action"
        );
        Ok(rows)
    }
}

/// Lists `<index>_<label>` subfolders of `input`, sorted by index.
pub fn scan_action_folders(input: &Path) -> AssembleResult<Vec<ActionFolder>> {
    if !input.is_dir() {
        return Err(AssembleError::configuration(format!(
            "input folder '{}' does not exist or is not a directory",
            input.display()
        )));
    }

    let mut actions = Vec::new();
    for entry in WalkDir::new(input).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| walk_error(input, e))?;
        let path = entry.path();
        if is_hidden(path) || !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        let (index, label) = parse_action_folder_name(&name).ok_or_else(|| {
            AssembleError::configuration(format!(
                "action folder '{}' must be named '<index>_<label>'",
                path.display()
            ))
        })?;
        actions.push(ActionFolder {
            index,
            label: label.to_string(),
            path: path.to_path_buf(),
        });
    }

    actions.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.path.cmp(&b.path)));
    Ok(actions)
}

/// Lists frame files of an action folder, sorted by their integer stem.
pub fn scan_frame_files(folder: &Path) -> AssembleResult<Vec<(i64, PathBuf)>> {
    let mut frames = Vec::new();
    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| walk_error(folder, e))?;
        let path = entry.path();
        if is_hidden(path) || !path.is_file() {
            continue;
        }
        let index = parse_frame_stem(path).ok_or_else(|| {
            AssembleError::configuration(format!(
                "frame file '{}' must be named '<index>.<ext>'",
                path.display()
            ))
        })?;
        frames.push((index, path.to_path_buf()));
    }

    frames.sort();
    Ok(frames)
}

/// Splits `"<index>_<label>"` into its integer index and label.
pub fn parse_action_folder_name(name: &str) -> Option<(i64, &str)> {
    let (prefix, label) = name.split_once('_')?;
    let index = prefix.trim().parse().ok()?;
    Some((index, label))
}

/// Parses the integer stem of a frame file name.
pub fn parse_frame_stem(path: &Path) -> Option<i64> {
    path.file_stem()?.to_str()?.trim().parse().ok()
}

fn load_frame(path: &Path) -> AssembleResult<DynamicImage> {
    let decode = || -> image::ImageResult<DynamicImage> {
        ImageReader::open(path)?.with_guessed_format()?.decode()
    };
    decode().map_err(|source| AssembleError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn walk_error(root: &Path, err: walkdir::Error) -> AssembleError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop while scanning"));
    AssembleError::io(path, source)
}
