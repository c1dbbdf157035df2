//! Pixel-art post-processing parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Resampling filter used when shrinking a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShrinkInterp {
    #[default]
    Nearest,
    Bilinear,
    Bicubic,
}

impl ShrinkInterp {
    /// Returns the snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShrinkInterp::Nearest => "nearest",
            ShrinkInterp::Bilinear => "bilinear",
            ShrinkInterp::Bicubic => "bicubic",
        }
    }
}

impl fmt::Display for ShrinkInterp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShrinkInterp {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(ShrinkInterp::Nearest),
            "bilinear" => Ok(ShrinkInterp::Bilinear),
            "bicubic" => Ok(ShrinkInterp::Bicubic),
            _ => Err(SpecError::UnknownValue {
                kind: "shrink interpolation",
                value: s.to_string(),
            }),
        }
    }
}

/// Parameters for the pixelation filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PixelateParam {
    /// Fraction of resolution removed, in [0, 1). 0.9 keeps 10% of each axis.
    #[serde(default = "default_pixelation_amount")]
    pub pixelation_amount: f64,

    /// Number of levels per color channel; 0 disables quantization.
    #[serde(default = "default_color_amount")]
    pub color_amount: f64,

    /// Alpha below this value (after stepping) becomes fully transparent.
    #[serde(default)]
    pub min_alpha: f64,

    /// Alpha is rounded down to a multiple of this step; 0 disables stepping.
    #[serde(default = "default_alpha_step")]
    pub alpha_step: f64,

    #[serde(default)]
    pub shrink_interp: ShrinkInterp,
}

fn default_pixelation_amount() -> f64 {
    0.9
}

fn default_color_amount() -> f64 {
    50.0
}

fn default_alpha_step() -> f64 {
    0.25
}

impl Default for PixelateParam {
    fn default() -> Self {
        Self {
            pixelation_amount: default_pixelation_amount(),
            color_amount: default_color_amount(),
            min_alpha: 0.0,
            alpha_step: default_alpha_step(),
            shrink_interp: ShrinkInterp::default(),
        }
    }
}

impl PixelateParam {
    /// Parses parameters from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the pixelation amount.
    pub fn with_pixelation_amount(mut self, amount: f64) -> Self {
        self.pixelation_amount = amount;
        self
    }

    /// Sets the color level count.
    pub fn with_color_amount(mut self, amount: f64) -> Self {
        self.color_amount = amount;
        self
    }

    /// Sets the minimum alpha.
    pub fn with_min_alpha(mut self, min_alpha: f64) -> Self {
        self.min_alpha = min_alpha;
        self
    }

    /// Sets the alpha step.
    pub fn with_alpha_step(mut self, step: f64) -> Self {
        self.alpha_step = step;
        self
    }

    /// Sets the shrink filter.
    pub fn with_shrink_interp(mut self, interp: ShrinkInterp) -> Self {
        self.shrink_interp = interp;
        self
    }
}
