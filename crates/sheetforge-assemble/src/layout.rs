//! Layout planning for the three output modes.
//!
//! Planning is pure: it reads row metrics and frame sizes and produces
//! absolute integer positions plus canvas sizes. Nothing is decoded, drawn
//! or written here.
//!
//! Vertical structure of a row, top to bottom:
//!
//! ```text
//! label block   label_height + label_margin   (only when labels are enabled)
//! cells         tallest cell height of the row
//! ```
//!
//! Rows on a sheet are separated by `label_margin`; cells within a row by
//! `image_margin`. The surrounding margin wraps the whole canvas. Wrapped
//! continuation rows reserve the same label block as the first chunk of
//! their action but draw no text.
//!
//! Every sum is checked: a canvas that would not fit in `u32` is a
//! [`AssembleError::Layout`].

use sheetforge_spec::{AssembleParam, Margin, SpriteAlign, SpriteConsistency};

use crate::align;
use crate::error::{AssembleError, AssembleResult};
use crate::rows::{RowData, RowSet};

/// Layout-relevant subset of [`AssembleParam`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    pub margin: Margin,
    pub label_margin: u32,
    pub image_margin: u32,
    pub consistency: SpriteConsistency,
    pub align: SpriteAlign,
    pub labels_enabled: bool,
}

impl From<&AssembleParam> for LayoutSettings {
    fn from(param: &AssembleParam) -> Self {
        Self {
            margin: param.surrounding_margin,
            label_margin: param.label_margin,
            image_margin: param.image_margin,
            consistency: param.consistency,
            align: param.align,
            labels_enabled: param.labels_enabled(),
        }
    }
}

/// Where a label's glyph origin goes. `y` may be negative when the ink offset exceeds the margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPlacement {
    pub x: i64,
    pub y: i64,
}

/// A frame's paint position and the cell it is aligned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlacement {
    pub frame_index: usize,
    pub x: u32,
    pub y: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

/// A planned row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPlacement {
    /// Index into [`RowSet::rows`].
    pub row_index: usize,
    /// Canvas y of the row's top edge.
    pub top: u32,
    pub label: Option<LabelPlacement>,
    pub frames: Vec<FramePlacement>,
    /// Max of cell run width and label width.
    pub width: u32,
    /// Label block plus tallest cell.
    pub height: u32,
}

/// A planned canvas holding one or more rows (sheet and strip modes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasPlan {
    pub width: u32,
    pub height: u32,
    pub rows: Vec<RowPlacement>,
}

/// A planned single-frame canvas (images mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePlan {
    pub row_index: usize,
    pub frame_index: usize,
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

/// Cell size of a frame of width `frame_width` in `row`.
///
/// | consistency | width | height |
/// |---|---|---|
/// | individual | the frame's own | row tallest |
/// | row | row widest | row tallest |
/// | all | global widest | global tallest |
pub fn cell_size(
    consistency: SpriteConsistency,
    set: &RowSet,
    row: &RowData,
    frame_width: u32,
) -> (u32, u32) {
    match consistency {
        SpriteConsistency::Individual => (frame_width, row.img_tallest),
        SpriteConsistency::Row => (row.img_widest, row.img_tallest),
        SpriteConsistency::All => (set.global_img_widest, set.global_img_tallest),
    }
}

/// Plans every row stacked on one canvas.
pub fn plan_sheet(set: &RowSet, settings: &LayoutSettings) -> AssembleResult<CanvasPlan> {
    let margin = settings.margin;
    let mut y = margin.top;
    let mut content_width = 0;
    let mut rows = Vec::with_capacity(set.rows.len());

    for row_index in 0..set.rows.len() {
        if row_index > 0 {
            y = add(y, settings.label_margin)?;
        }
        let placement = place_row(set, row_index, y, settings)?;
        y = add(y, placement.height)?;
        content_width = content_width.max(placement.width);
        rows.push(placement);
    }

    Ok(CanvasPlan {
        width: sum(&[margin.left, content_width, margin.right])?,
        height: add(y, margin.bottom)?,
        rows,
    })
}

/// Plans one row on its own canvas.
///
/// # Panics
/// Panics if `row_index` is out of bounds.
pub fn plan_strip(
    set: &RowSet,
    row_index: usize,
    settings: &LayoutSettings,
) -> AssembleResult<CanvasPlan> {
    let margin = settings.margin;
    let placement = place_row(set, row_index, margin.top, settings)?;
    Ok(CanvasPlan {
        width: sum(&[margin.left, placement.width, margin.right])?,
        height: sum(&[margin.top, placement.height, margin.bottom])?,
        rows: vec![placement],
    })
}

/// Plans one canvas per frame of a row: its cell plus the surrounding margin.
///
/// # Panics
/// Panics if `row_index` is out of bounds.
pub fn plan_images(
    set: &RowSet,
    row_index: usize,
    settings: &LayoutSettings,
) -> AssembleResult<Vec<ImagePlan>> {
    let row = &set.rows[row_index];
    let margin = settings.margin;

    row.images
        .iter()
        .enumerate()
        .map(|(frame_index, image)| {
            let (cell_width, cell_height) =
                cell_size(settings.consistency, set, row, image.width());
            let (dx, dy) = align::offset(
                settings.align,
                cell_width,
                cell_height,
                image.width(),
                image.height(),
            );
            Ok(ImagePlan {
                row_index,
                frame_index,
                width: sum(&[margin.left, cell_width, margin.right])?,
                height: sum(&[margin.top, cell_height, margin.bottom])?,
                x: add(margin.left, dx)?,
                y: add(margin.top, dy)?,
            })
        })
        .collect()
}

fn place_row(
    set: &RowSet,
    row_index: usize,
    top: u32,
    settings: &LayoutSettings,
) -> AssembleResult<RowPlacement> {
    let row = &set.rows[row_index];
    let left = settings.margin.left;

    // Glyphs paint from the margin; only the vertical ink offset is corrected.
    let (label, label_block, label_width) = if settings.labels_enabled {
        let label = row.has_label().then(|| LabelPlacement {
            x: i64::from(left),
            y: i64::from(top) - i64::from(row.label_offset.1),
        });
        let label_width = if row.has_label() {
            add(row.label_offset.0, row.label_width)?
        } else {
            0
        };
        (
            label,
            add(row.label_block_height, settings.label_margin)?,
            label_width,
        )
    } else {
        (None, 0, 0)
    };

    let cells_top = add(top, label_block)?;
    let mut x = left;
    let mut tallest_cell = 0;
    let mut frames = Vec::with_capacity(row.images.len());

    for (frame_index, image) in row.images.iter().enumerate() {
        let (cell_width, cell_height) = cell_size(settings.consistency, set, row, image.width());
        let (dx, dy) = align::offset(
            settings.align,
            cell_width,
            cell_height,
            image.width(),
            image.height(),
        );
        frames.push(FramePlacement {
            frame_index,
            x: add(x, dx)?,
            y: add(cells_top, dy)?,
            cell_width,
            cell_height,
        });
        x = sum(&[x, cell_width, settings.image_margin])?;
        tallest_cell = tallest_cell.max(cell_height);
    }

    // `x` ends one image margin past the last cell.
    let cells_width = (x - left).saturating_sub(settings.image_margin);

    Ok(RowPlacement {
        row_index,
        top,
        label,
        frames,
        width: cells_width.max(label_width),
        height: add(label_block, tallest_cell)?,
    })
}

fn add(a: u32, b: u32) -> AssembleResult<u32> {
    a.checked_add(b)
        .ok_or_else(|| AssembleError::Layout("canvas dimensions overflow".to_string()))
}

fn sum(values: &[u32]) -> AssembleResult<u32> {
    values.iter().try_fold(0, |acc, &v| add(acc, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::TextBounds;
    use image::DynamicImage;
    use pretty_assertions::assert_eq;

    fn frames(sizes: &[(u32, u32)]) -> Vec<DynamicImage> {
        sizes
            .iter()
            .map(|&(w, h)| DynamicImage::new_rgba8(w, h))
            .collect()
    }

    fn row(label: &str, sizes: &[(u32, u32)]) -> RowData {
        RowData::new(label, 0, label, TextBounds::default(), frames(sizes))
    }

    fn settings(consistency: SpriteConsistency, align: SpriteAlign) -> LayoutSettings {
        LayoutSettings {
            margin: Margin::uniform(10),
            label_margin: 10,
            image_margin: 10,
            consistency,
            align,
            labels_enabled: false,
        }
    }

    fn positions(plan: &CanvasPlan, row: usize) -> Vec<(u32, u32)> {
        plan.rows[row].frames.iter().map(|f| (f.x, f.y)).collect()
    }

    #[test]
    fn test_sheet_walk_and_jump() {
        let set = RowSet::from_rows(vec![
            row("Walk", &[(64, 64), (64, 64)]),
            row("Jump", &[(64, 96)]),
        ]);
        let plan = plan_sheet(
            &set,
            &settings(SpriteConsistency::Row, SpriteAlign::BottomCenter),
        ).unwrap();

        assert_eq!((plan.width, plan.height), (158, 190));
        assert_eq!(positions(&plan, 0), vec![(10, 10), (84, 10)]);
        assert_eq!(positions(&plan, 1), vec![(10, 84)]);
    }

    #[test]
    fn test_individual_cells_follow_frame_width() {
        let set = RowSet::from_rows(vec![row("A", &[(4, 8), (10, 2)])]);
        let s = LayoutSettings {
            image_margin: 1,
            ..settings(SpriteConsistency::Individual, SpriteAlign::BottomLeft)
        };
        let plan = plan_sheet(&set, &s).unwrap();

        let cells: Vec<_> = plan.rows[0]
            .frames
            .iter()
            .map(|f| (f.cell_width, f.cell_height))
            .collect();
        assert_eq!(cells, vec![(4, 8), (10, 8)]);
        assert_eq!(positions(&plan, 0), vec![(10, 10), (15, 16)]);
        assert_eq!(plan.width, 10 + 4 + 1 + 10 + 10);
    }

    #[test]
    fn test_all_consistency_uses_global_cells() {
        let set = RowSet::from_rows(vec![
            row("A", &[(4, 4), (2, 2)]),
            row("B", &[(8, 3)]),
            row("C", &[(1, 9)]),
        ]);
        let plan = plan_sheet(
            &set,
            &settings(SpriteConsistency::All, SpriteAlign::MiddleCenter),
        ).unwrap();

        for r in &plan.rows {
            for f in &r.frames {
                assert_eq!((f.cell_width, f.cell_height), (8, 9));
            }
        }
        // Widest row: two 8-wide cells and one gap.
        assert_eq!(plan.width, 10 + 8 + 10 + 8 + 10);
    }

    #[test]
    fn test_labels_reserve_block_even_on_continuation_rows() {
        let bounds = TextBounds {
            left: 0,
            top: 2,
            right: 30,
            bottom: 9,
        };
        let set = RowSet::from_rows(vec![
            RowData::new("Walk", 0, "Walk", bounds, frames(&[(5, 5)])),
            RowData::new("Walk", 1, "", TextBounds::default(), frames(&[(5, 5)]))
                .with_label_block_height(7),
        ]);
        let s = LayoutSettings {
            labels_enabled: true,
            ..settings(SpriteConsistency::Row, SpriteAlign::TopLeft)
        };
        let plan = plan_sheet(&set, &s).unwrap();

        let first = &plan.rows[0];
        assert_eq!(first.label, Some(LabelPlacement { x: 10, y: 8 }));
        assert_eq!(first.height, 7 + 10 + 5);
        assert_eq!(first.frames[0].y, 10 + 7 + 10);
        assert_eq!(first.width, 30);

        let second = &plan.rows[1];
        assert_eq!(second.label, None);
        assert_eq!(second.top, 10 + 22 + 10);
        assert_eq!(second.height, first.height);
        assert_eq!(second.frames[0].y, second.top + 7 + 10);
        assert_eq!(second.width, 5);

        assert_eq!(plan.width, 10 + 30 + 10);
        assert_eq!(plan.height, second.top + 22 + 10);
    }

    #[test]
    fn test_label_paints_from_left_margin() {
        let bounds = TextBounds {
            left: 3,
            top: 1,
            right: 20,
            bottom: 8,
        };
        let set = RowSet::from_rows(vec![RowData::new(
            "Idle",
            0,
            "Idle",
            bounds,
            frames(&[(4, 4)]),
        )]);
        let s = LayoutSettings {
            labels_enabled: true,
            ..settings(SpriteConsistency::Row, SpriteAlign::TopLeft)
        };
        let plan = plan_sheet(&set, &s).unwrap();

        assert_eq!(plan.rows[0].label, Some(LabelPlacement { x: 10, y: 9 }));
        // Ink spans glyph-origin x 3..20, so the row is 20 wide.
        assert_eq!(plan.rows[0].width, 20);
        assert_eq!(plan.width, 10 + 20 + 10);
    }

    #[test]
    fn test_oversized_margins_are_layout_errors() {
        let set = RowSet::from_rows(vec![row("A", &[(4, 4)]), row("B", &[(4, 4)])]);
        let huge = LayoutSettings {
            margin: Margin::new(u32::MAX - 1, 0, 8, 0),
            ..settings(SpriteConsistency::Row, SpriteAlign::TopLeft)
        };
        let err = plan_sheet(&set, &huge).unwrap_err();
        assert!(matches!(err, AssembleError::Layout(_)));

        let wide = LayoutSettings {
            margin: Margin::new(0, u32::MAX, 0, 1),
            ..settings(SpriteConsistency::Row, SpriteAlign::TopLeft)
        };
        assert!(matches!(
            plan_strip(&set, 0, &wide).unwrap_err(),
            AssembleError::Layout(_)
        ));
        assert!(matches!(
            plan_images(&set, 0, &wide).unwrap_err(),
            AssembleError::Layout(_)
        ));

        let gap = LayoutSettings {
            image_margin: u32::MAX,
            ..settings(SpriteConsistency::Row, SpriteAlign::TopLeft)
        };
        let set = RowSet::from_rows(vec![row("C", &[(4, 4), (4, 4)])]);
        assert!(plan_sheet(&set, &gap).is_err());
    }

    #[test]
    fn test_labels_disabled_ignore_label_metrics() {
        let bounds = TextBounds {
            left: 0,
            top: 0,
            right: 100,
            bottom: 20,
        };
        let set = RowSet::from_rows(vec![RowData::new(
            "Walk",
            0,
            "Walk",
            bounds,
            frames(&[(5, 5)]),
        )]);
        let plan = plan_sheet(
            &set,
            &settings(SpriteConsistency::Row, SpriteAlign::TopLeft),
        ).unwrap();
        assert_eq!(plan.rows[0].label, None);
        assert_eq!((plan.width, plan.height), (25, 25));
    }

    #[test]
    fn test_strip_is_single_row_canvas() {
        let set = RowSet::from_rows(vec![
            row("Walk", &[(64, 64), (64, 64)]),
            row("Jump", &[(64, 96)]),
        ]);
        let s = settings(SpriteConsistency::Row, SpriteAlign::BottomCenter);

        let walk = plan_strip(&set, 0, &s).unwrap();
        assert_eq!((walk.width, walk.height), (158, 84));
        let jump = plan_strip(&set, 1, &s).unwrap();
        assert_eq!((jump.width, jump.height), (84, 116));
        assert_eq!(positions(&jump, 0), vec![(10, 10)]);
    }

    #[test]
    fn test_images_pad_each_frame_to_its_cell() {
        let set = RowSet::from_rows(vec![row("A", &[(4, 8), (2, 2)])]);

        let row_plans = plan_images(
            &set,
            0,
            &settings(SpriteConsistency::Row, SpriteAlign::BottomRight),
        ).unwrap();
        assert_eq!(
            row_plans[1],
            ImagePlan {
                row_index: 0,
                frame_index: 1,
                width: 24,
                height: 28,
                x: 12,
                y: 16,
            }
        );

        let individual = plan_images(
            &set,
            0,
            &settings(SpriteConsistency::Individual, SpriteAlign::BottomRight),
        ).unwrap();
        assert_eq!((individual[1].width, individual[1].height), (22, 28));
        assert_eq!((individual[1].x, individual[1].y), (10, 16));
    }
}
