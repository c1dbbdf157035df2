//! CLI argument definitions for the SheetForge command-line interface.
//!
//! All clap derive types live here, keeping `main.rs` focused on dispatch.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use sheetforge_spec::{
    CombineMode, Margin, PixelateParam, ShrinkInterp, SpriteAlign, SpriteConsistency,
};

/// SheetForge - Sprite Sheet Assembly
#[derive(Parser)]
#[command(name = "sheetforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble a folder of rendered frames into a sheet, strips or images
    Assemble(AssembleArgs),

    /// Pixelate a single image file
    Pixelate {
        /// Image to pixelate
        input: PathBuf,

        /// Output file (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        pixelation: PixelationArgs,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate an assembly config file without touching any images
    Validate {
        /// Path to the JSON config file
        #[arg(short, long)]
        config: PathBuf,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

/// Options of the `assemble` command. Flags override values from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct AssembleArgs {
    /// Folder with one `<index>_<action>` subfolder per animation
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Sheet file (sheet mode) or output directory (strips/images mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON config file with assembly parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Label font size in pixels (0 disables labels)
    #[arg(long)]
    pub font_size: Option<u32>,

    /// Surrounding margin: one value or `top,right,bottom,left`
    #[arg(long)]
    pub margin: Option<Margin>,

    /// Gap after a label and between rows
    #[arg(long)]
    pub label_margin: Option<u32>,

    /// Gap between frames in a row
    #[arg(long)]
    pub image_margin: Option<u32>,

    /// Cell sizing policy (individual, row, all)
    #[arg(long)]
    pub consistency: Option<SpriteConsistency>,

    /// Frame alignment inside its cell (e.g. bottom_center)
    #[arg(long)]
    pub align: Option<SpriteAlign>,

    /// Output mode (sheet, strips, images)
    #[arg(short, long)]
    pub mode: Option<CombineMode>,

    /// Wrap rows after this many frames (0 = never)
    #[arg(long)]
    pub max_frames_per_row: Option<u32>,

    /// File extension for strips and per-frame images
    #[arg(long)]
    pub extension: Option<String>,

    /// Pixelate every frame before laying it out
    #[arg(long)]
    pub pixelate: bool,

    #[command(flatten)]
    pub pixelation: PixelationArgs,

    /// Replace an existing sheet instead of picking a free `_N` name
    #[arg(long)]
    pub overwrite: bool,

    /// Output machine-readable JSON diagnostics (no colored output)
    #[arg(long)]
    pub json: bool,
}

/// Pixelation settings shared by `assemble --pixelate` and `pixelate`.
#[derive(Args, Debug, Clone, Default)]
pub struct PixelationArgs {
    /// Fraction of resolution removed, in [0, 1)
    #[arg(long)]
    pub pixelation_amount: Option<f64>,

    /// Color levels per channel (0 disables quantization)
    #[arg(long)]
    pub color_amount: Option<f64>,

    /// Alpha below this becomes fully transparent
    #[arg(long)]
    pub min_alpha: Option<f64>,

    /// Alpha is rounded down to a multiple of this step
    #[arg(long)]
    pub alpha_step: Option<f64>,

    /// Shrink filter (nearest, bilinear, bicubic)
    #[arg(long)]
    pub shrink_interp: Option<ShrinkInterp>,
}

impl PixelationArgs {
    /// Builds parameters from the defaults plus any flags given.
    pub fn to_param(&self) -> PixelateParam {
        let mut param = PixelateParam::default();
        if let Some(v) = self.pixelation_amount {
            param.pixelation_amount = v;
        }
        if let Some(v) = self.color_amount {
            param.color_amount = v;
        }
        if let Some(v) = self.min_alpha {
            param.min_alpha = v;
        }
        if let Some(v) = self.alpha_step {
            param.alpha_step = v;
        }
        if let Some(v) = self.shrink_interp {
            param.shrink_interp = v;
        }
        param
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_assemble() {
        let cli = Cli::try_parse_from([
            "sheetforge",
            "assemble",
            "-i",
            "renders",
            "-o",
            "sheet.png",
            "--margin",
            "1,2,3,4",
            "--align",
            "middle-center",
            "--consistency",
            "row",
            "--mode",
            "strips",
            "--max-frames-per-row",
            "8",
        ])
        .unwrap();
        match cli.command {
            Commands::Assemble(args) => {
                assert_eq!(args.input, Some(PathBuf::from("renders")));
                assert_eq!(args.output, Some(PathBuf::from("sheet.png")));
                assert_eq!(args.margin, Some(Margin::new(1, 2, 3, 4)));
                assert_eq!(args.align, Some(SpriteAlign::MiddleCenter));
                assert_eq!(args.consistency, Some(SpriteConsistency::Row));
                assert_eq!(args.mode, Some(CombineMode::Strips));
                assert_eq!(args.max_frames_per_row, Some(8));
                assert!(!args.json);
                assert!(!args.overwrite);
            }
            _ => panic!("expected assemble command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_align() {
        let result = Cli::try_parse_from(["sheetforge", "assemble", "--align", "north"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_counts_verbosity() {
        let cli = Cli::try_parse_from(["sheetforge", "-vv", "validate", "-c", "cfg.json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Validate { config, json } => {
                assert_eq!(config, PathBuf::from("cfg.json"));
                assert!(!json);
            }
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_cli_parses_pixelate() {
        let cli = Cli::try_parse_from([
            "sheetforge",
            "pixelate",
            "frame.png",
            "--pixelation-amount",
            "0.5",
            "--shrink-interp",
            "bicubic",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Pixelate {
                input,
                output,
                pixelation,
                json,
            } => {
                assert_eq!(input, PathBuf::from("frame.png"));
                assert_eq!(output, None);
                assert!(json);
                let param = pixelation.to_param();
                assert_eq!(param.pixelation_amount, 0.5);
                assert_eq!(param.shrink_interp, ShrinkInterp::Bicubic);
                assert_eq!(param.color_amount, PixelateParam::default().color_amount);
            }
            _ => panic!("expected pixelate command"),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
