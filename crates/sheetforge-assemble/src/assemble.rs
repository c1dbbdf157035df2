//! Assembly orchestration: rows, layout, compositing and output per mode.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sheetforge_spec::validation::validate_params;
use sheetforge_spec::{AssembleParam, CombineMode};
use tracing::{debug, info, warn};

use crate::compose::{render_canvas, render_image};
use crate::error::{AssembleError, AssembleResult};
use crate::filter::FrameFilter;
use crate::font::BitmapFont;
use crate::layout::{plan_images, plan_sheet, plan_strip, LayoutSettings};
use crate::observer::{AssembleObserver, CancelToken, NoopObserver};
use crate::output::{ensure_dir, format_for_extension, format_for_path, normalize_extension, save_image_as};
use crate::rows::{RowBuilder, RowSet};

/// File name used for strips whose action label is empty.
pub const UNTITLED_STRIP: &str = "Untitled";

/// A file written by an assembly run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Summary of a finished assembly run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembleReport {
    pub mode: CombineMode,
    /// Number of rows after wrapping.
    pub rows: usize,
    pub frames: usize,
    /// Files written, in write order.
    pub outputs: Vec<OutputFile>,
}

/// Assembles frames with default hooks: no observer, filter or cancellation.
pub fn assemble(param: &AssembleParam) -> AssembleResult<AssembleReport> {
    Assembler::new(param).run()
}

/// One assembly run with optional hooks.
///
/// ```no_run
/// use sheetforge_assemble::{Assembler, CancelToken};
/// use sheetforge_spec::AssembleParam;
///
/// let param = AssembleParam::new("renders", "out/sheet.png");
/// let cancel = CancelToken::new();
/// let report = Assembler::new(&param).with_cancel(&cancel).run()?;
/// println!("wrote {} file(s)", report.outputs.len());
/// # Ok::<(), sheetforge_assemble::AssembleError>(())
/// ```
pub struct Assembler<'a> {
    param: &'a AssembleParam,
    observer: Option<&'a mut dyn AssembleObserver>,
    filter: Option<&'a dyn FrameFilter>,
    cancel: Option<&'a CancelToken>,
}

impl<'a> Assembler<'a> {
    pub fn new(param: &'a AssembleParam) -> Self {
        Self {
            param,
            observer: None,
            filter: None,
            cancel: None,
        }
    }

    /// Receives row and frame progress events.
    pub fn with_observer(mut self, observer: &'a mut dyn AssembleObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Applies `filter` to every frame right after decoding.
    pub fn with_filter(mut self, filter: &'a dyn FrameFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Aborts with [`AssembleError::Cancelled`] once `cancel` fires.
    pub fn with_cancel(mut self, cancel: &'a CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Runs the assembly and writes the outputs for the configured mode.
    pub fn run(self) -> AssembleResult<AssembleReport> {
        let param = self.param;
        check_params(param)?;

        info!(
            "Assembling '{}' as {} into '{}'",
            param.input_folder_path.display(),
            param.combine_mode,
            param.output_path.display()
        );

        let mut builder = RowBuilder::new(param.max_frames_per_row, param.font_size);
        if let Some(filter) = self.filter {
            builder = builder.with_filter(filter);
        }
        if let Some(cancel) = self.cancel {
            builder = builder.with_cancel(cancel);
        }
        let set = builder.build(&param.input_folder_path)?;
        if set.rows.is_empty() {
            return Err(AssembleError::Layout(format!(
                "no frames found under '{}'",
                param.input_folder_path.display()
            )));
        }

        let mut noop = NoopObserver;
        let observer: &mut dyn AssembleObserver = match self.observer {
            Some(observer) => observer,
            None => &mut noop,
        };
        let mut run = ModeRun {
            param,
            set: &set,
            settings: LayoutSettings::from(param),
            font: BitmapFont::for_size(param.font_size),
            observer,
            cancel: self.cancel,
            outputs: Vec::new(),
        };

        match param.combine_mode {
            CombineMode::Sheet => run.sheet()?,
            CombineMode::Strips => run.strips()?,
            CombineMode::Images => run.images()?,
        }

        let report = AssembleReport {
            mode: param.combine_mode,
            rows: set.rows.len(),
            frames: set.frame_count(),
            outputs: run.outputs,
        };
        info!(
            "Assembled {} frame(s) in {} row(s) into {} file(s)",
            report.frames,
            report.rows,
            report.outputs.len()
        );
        Ok(report)
    }
}

/// State shared by the per-mode writers of one run.
struct ModeRun<'r> {
    param: &'r AssembleParam,
    set: &'r RowSet,
    settings: LayoutSettings,
    font: Option<BitmapFont>,
    observer: &'r mut dyn AssembleObserver,
    cancel: Option<&'r CancelToken>,
    outputs: Vec<OutputFile>,
}

impl ModeRun<'_> {
    fn sheet(&mut self) -> AssembleResult<()> {
        let path = self.param.output_path.clone();
        let format = format_for_path(&path)?;

        let plan = plan_sheet(self.set, &self.settings)?;
        debug!("Sheet canvas {}x{}", plan.width, plan.height);
        let canvas = render_canvas(
            &plan,
            self.set,
            self.set.first_color(),
            self.font,
            self.observer,
            self.cancel,
        )?;

        save_image_as(&canvas, &path, format)?;
        self.record(path, canvas.width(), canvas.height());
        Ok(())
    }

    fn strips(&mut self) -> AssembleResult<()> {
        let dir = self.param.output_path.clone();
        let ext = normalize_extension(&self.param.extension);
        let format = format_for_extension(&ext)?;
        ensure_dir(&dir)?;

        let set = self.set;
        let mut used = HashSet::new();
        for (row_index, row) in set.rows.iter().enumerate() {
            let plan = plan_strip(set, row_index, &self.settings)?;
            let color = row.images.first().map(|img| img.color());
            let canvas = render_canvas(
                &plan,
                set,
                color,
                self.font,
                self.observer,
                self.cancel,
            )?;

            let name = strip_name(&row.action_label, &mut used);
            let path = dir.join(format!("{}.{}", name, ext));
            save_image_as(&canvas, &path, format)?;
            self.record(path, canvas.width(), canvas.height());
        }
        Ok(())
    }

    fn images(&mut self) -> AssembleResult<()> {
        let dir = self.param.output_path.clone();
        let ext = normalize_extension(&self.param.extension);
        let format = format_for_extension(&ext)?;
        ensure_dir(&dir)?;

        let set = self.set;
        for (row_index, row) in set.rows.iter().enumerate() {
            if self.cancel.is_some_and(|c| c.is_cancelled()) {
                return Err(AssembleError::Cancelled);
            }

            let label = row.action_label.as_str();
            let row_dir = image_row_dir(&dir, row_index, label);
            ensure_dir(&row_dir)?;
            self.observer.on_row_start(row_index, label, row.images.len());

            for plan in plan_images(set, row_index, &self.settings)? {
                self.observer.on_frame_start(row_index, label, plan.frame_index);
                let canvas = render_image(&plan, &row.images[plan.frame_index]);
                let path = row_dir.join(format!("{}.{}", plan.frame_index, ext));
                save_image_as(&canvas, &path, format)?;
                self.record(path, canvas.width(), canvas.height());
                self.observer.on_frame_end(row_index, label, plan.frame_index);
            }

            self.observer.on_row_end(row_index, label, row.images.len());
        }
        Ok(())
    }

    fn record(&mut self, path: PathBuf, width: u32, height: u32) {
        info!("Wrote {}x{} '{}'", width, height, path.display());
        self.outputs.push(OutputFile {
            path,
            width,
            height,
        });
    }
}

/// Returns a strip file stem for `label` not yet in `used`, and records it.
///
/// The first use of a label keeps it as is; later uses get `_1`, `_2`, ...
pub fn strip_name(label: &str, used: &mut HashSet<String>) -> String {
    let base = if label.trim().is_empty() {
        UNTITLED_STRIP
    } else {
        label
    };

    let mut name = base.to_string();
    let mut n = 1;
    while used.contains(&name) {
        name = format!("{}_{}", base, n);
        n += 1;
    }
    used.insert(name.clone());
    name
}

fn check_params(param: &AssembleParam) -> AssembleResult<()> {
    let result = validate_params(param);
    for warning in &result.warnings {
        warn!("{}", warning);
    }
    if result.is_ok() {
        return Ok(());
    }
    let messages: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
    Err(AssembleError::configuration(messages.join("; ")))
}

/// Output directory for a row in images mode.
pub fn image_row_dir(output: &Path, row_index: usize, action_label: &str) -> PathBuf {
    output.join(format!("{}_{}", row_index, action_label))
}
