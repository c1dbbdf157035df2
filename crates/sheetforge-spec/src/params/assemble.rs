//! Assembly parameters: layout policy, alignment and output mode.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Extension used for strip and per-image outputs when none is configured.
pub const DEFAULT_EXTENSION: &str = "png";

/// Image extensions the assembler can write.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tga"];

/// Horizontal component of a [`SpriteAlign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

/// Vertical component of a [`SpriteAlign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// Where a frame sits inside its cell when the cell is larger than the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteAlign {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

impl SpriteAlign {
    /// All nine alignments, row-major from top-left.
    pub const ALL: [SpriteAlign; 9] = [
        SpriteAlign::TopLeft,
        SpriteAlign::TopCenter,
        SpriteAlign::TopRight,
        SpriteAlign::MiddleLeft,
        SpriteAlign::MiddleCenter,
        SpriteAlign::MiddleRight,
        SpriteAlign::BottomLeft,
        SpriteAlign::BottomCenter,
        SpriteAlign::BottomRight,
    ];

    /// Returns the horizontal component.
    pub fn horizontal(&self) -> HorizontalAlign {
        match self {
            SpriteAlign::TopLeft | SpriteAlign::MiddleLeft | SpriteAlign::BottomLeft => {
                HorizontalAlign::Left
            }
            SpriteAlign::TopCenter | SpriteAlign::MiddleCenter | SpriteAlign::BottomCenter => {
                HorizontalAlign::Center
            }
            SpriteAlign::TopRight | SpriteAlign::MiddleRight | SpriteAlign::BottomRight => {
                HorizontalAlign::Right
            }
        }
    }

    /// Returns the vertical component.
    pub fn vertical(&self) -> VerticalAlign {
        match self {
            SpriteAlign::TopLeft | SpriteAlign::TopCenter | SpriteAlign::TopRight => {
                VerticalAlign::Top
            }
            SpriteAlign::MiddleLeft | SpriteAlign::MiddleCenter | SpriteAlign::MiddleRight => {
                VerticalAlign::Middle
            }
            SpriteAlign::BottomLeft | SpriteAlign::BottomCenter | SpriteAlign::BottomRight => {
                VerticalAlign::Bottom
            }
        }
    }

    /// Returns the snake_case name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteAlign::TopLeft => "top_left",
            SpriteAlign::TopCenter => "top_center",
            SpriteAlign::TopRight => "top_right",
            SpriteAlign::MiddleLeft => "middle_left",
            SpriteAlign::MiddleCenter => "middle_center",
            SpriteAlign::MiddleRight => "middle_right",
            SpriteAlign::BottomLeft => "bottom_left",
            SpriteAlign::BottomCenter => "bottom_center",
            SpriteAlign::BottomRight => "bottom_right",
        }
    }
}

impl fmt::Display for SpriteAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpriteAlign {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        SpriteAlign::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| SpecError::UnknownValue {
                kind: "alignment",
                value: s.to_string(),
            })
    }
}

/// Governs the cell size each frame is positioned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteConsistency {
    /// Each frame keeps its own width; cells share the row's tallest height.
    #[default]
    Individual,
    /// All cells in a row share the row's widest width and tallest height.
    Row,
    /// All cells in the output share the global widest width and tallest height.
    All,
}

impl SpriteConsistency {
    /// Returns the snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteConsistency::Individual => "individual",
            SpriteConsistency::Row => "row",
            SpriteConsistency::All => "all",
        }
    }
}

impl fmt::Display for SpriteConsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpriteConsistency {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "individual" => Ok(SpriteConsistency::Individual),
            "row" => Ok(SpriteConsistency::Row),
            "all" => Ok(SpriteConsistency::All),
            _ => Err(SpecError::UnknownValue {
                kind: "consistency",
                value: s.to_string(),
            }),
        }
    }
}

/// Output form of an assembly run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    /// One image holding every row.
    #[default]
    Sheet,
    /// One image per row.
    Strips,
    /// One image per frame, grouped in per-row folders.
    Images,
}

impl CombineMode {
    /// Returns the snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CombineMode::Sheet => "sheet",
            CombineMode::Strips => "strips",
            CombineMode::Images => "images",
        }
    }
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombineMode {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sheet" => Ok(CombineMode::Sheet),
            "strips" => Ok(CombineMode::Strips),
            "images" => Ok(CombineMode::Images),
            _ => Err(SpecError::UnknownValue {
                kind: "combine mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Margin around the content of an output canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margin {
    /// Creates a margin from top, right, bottom, left (CSS order).
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates a margin with the same value on every side.
    pub fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of left and right.
    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

impl FromStr for Margin {
    type Err = SpecError;

    /// Parses `"10"` (all sides) or `"top,right,bottom,left"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SpecError::UnknownValue {
            kind: "margin",
            value: s.to_string(),
        };
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        match values.as_slice() {
            [all] => Ok(Margin::uniform(*all)),
            [top, right, bottom, left] => Ok(Margin::new(*top, *right, *bottom, *left)),
            _ => Err(invalid()),
        }
    }
}

/// Parameters for one assembly run.
///
/// The defaults mirror the authoring tool: 24px labels, 15px margins,
/// individual consistency, bottom-center alignment and a single sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssembleParam {
    /// Folder holding one `<index>_<label>` subfolder per action.
    #[serde(default)]
    pub input_folder_path: PathBuf,

    /// Sheet file (sheet mode) or output directory (strips/images mode).
    #[serde(default)]
    pub output_path: PathBuf,

    /// Label font size in pixels; 0 disables labels.
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Margin around each output canvas.
    #[serde(default = "default_surrounding_margin")]
    pub surrounding_margin: Margin,

    /// Vertical gap after a label, also used between rows.
    #[serde(default = "default_gap")]
    pub label_margin: u32,

    /// Horizontal gap between frames in a row.
    #[serde(default = "default_gap")]
    pub image_margin: u32,

    #[serde(default)]
    pub consistency: SpriteConsistency,

    #[serde(default)]
    pub align: SpriteAlign,

    #[serde(default)]
    pub combine_mode: CombineMode,

    /// Frames per row before wrapping; 0 means one row per action.
    #[serde(default)]
    pub max_frames_per_row: u32,

    /// Extension for strip and per-image outputs.
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_font_size() -> u32 {
    24
}

fn default_surrounding_margin() -> Margin {
    Margin::uniform(15)
}

fn default_gap() -> u32 {
    15
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl AssembleParam {
    /// Creates parameters with default layout settings.
    pub fn new(input_folder_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_folder_path: input_folder_path.into(),
            output_path: output_path.into(),
            font_size: default_font_size(),
            surrounding_margin: default_surrounding_margin(),
            label_margin: default_gap(),
            image_margin: default_gap(),
            consistency: SpriteConsistency::default(),
            align: SpriteAlign::default(),
            combine_mode: CombineMode::default(),
            max_frames_per_row: 0,
            extension: default_extension(),
        }
    }

    /// Parses parameters from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads parameters from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes parameters to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns true when labels are drawn.
    pub fn labels_enabled(&self) -> bool {
        self.font_size != 0
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the surrounding margin.
    pub fn with_surrounding_margin(mut self, margin: Margin) -> Self {
        self.surrounding_margin = margin;
        self
    }

    /// Sets the label margin.
    pub fn with_label_margin(mut self, label_margin: u32) -> Self {
        self.label_margin = label_margin;
        self
    }

    /// Sets the image margin.
    pub fn with_image_margin(mut self, image_margin: u32) -> Self {
        self.image_margin = image_margin;
        self
    }

    /// Sets the consistency policy.
    pub fn with_consistency(mut self, consistency: SpriteConsistency) -> Self {
        self.consistency = consistency;
        self
    }

    /// Sets the alignment.
    pub fn with_align(mut self, align: SpriteAlign) -> Self {
        self.align = align;
        self
    }

    /// Sets the output mode.
    pub fn with_combine_mode(mut self, combine_mode: CombineMode) -> Self {
        self.combine_mode = combine_mode;
        self
    }

    /// Sets the row wrapping limit.
    pub fn with_max_frames_per_row(mut self, max_frames_per_row: u32) -> Self {
        self.max_frames_per_row = max_frames_per_row;
        self
    }

    /// Sets the strip/per-image extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}
