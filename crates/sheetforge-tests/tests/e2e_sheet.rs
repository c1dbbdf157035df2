//! End-to-end tests for sheet mode.

use pretty_assertions::assert_eq;
use sheetforge_assemble::assemble;
use sheetforge_spec::{AssembleParam, CombineMode, Margin, SpriteAlign, SpriteConsistency};
use sheetforge_tests::fixtures::frame_color;
use sheetforge_tests::harness::open;
use sheetforge_tests::{is_blank, pixel, FrameFolderFixture};

fn walk_and_jump() -> FrameFolderFixture {
    let fixture = FrameFolderFixture::new();
    fixture.add_frames(0, "Walk", 2, (64, 64));
    fixture.add_frame(1, "Jump", 0, (64, 96));
    fixture
}

fn sheet_param(fixture: &FrameFolderFixture) -> AssembleParam {
    AssembleParam::new(&fixture.input, fixture.output("sheet.png"))
        .with_font_size(0)
        .with_surrounding_margin(Margin::uniform(10))
        .with_label_margin(10)
        .with_image_margin(10)
        .with_consistency(SpriteConsistency::Row)
        .with_align(SpriteAlign::BottomCenter)
        .with_combine_mode(CombineMode::Sheet)
}

#[test]
fn test_walk_and_jump_sheet() {
    let fixture = walk_and_jump();
    let param = sheet_param(&fixture);

    let report = assemble(&param).unwrap();
    assert_eq!(report.mode, CombineMode::Sheet);
    assert_eq!(report.rows, 2);
    assert_eq!(report.frames, 3);
    assert_eq!(report.outputs.len(), 1);
    assert_eq!(report.outputs[0].path, param.output_path);
    assert_eq!((report.outputs[0].width, report.outputs[0].height), (158, 190));

    let sheet = open(&param.output_path);
    assert_eq!((sheet.width(), sheet.height()), (158, 190));

    // Frame corners.
    assert_eq!(pixel(&sheet, 10, 10), frame_color(0, 0));
    assert_eq!(pixel(&sheet, 73, 73), frame_color(0, 0));
    assert_eq!(pixel(&sheet, 84, 10), frame_color(0, 1));
    assert_eq!(pixel(&sheet, 147, 73), frame_color(0, 1));
    assert_eq!(pixel(&sheet, 10, 84), frame_color(1, 0));
    assert_eq!(pixel(&sheet, 73, 179), frame_color(1, 0));

    // Margins and gaps stay transparent.
    assert!(is_blank(&sheet, 0, 0, 158, 10));
    assert!(is_blank(&sheet, 74, 10, 10, 64));
    assert!(is_blank(&sheet, 10, 74, 148, 10));
    assert!(is_blank(&sheet, 74, 84, 84, 96));
    assert!(is_blank(&sheet, 0, 180, 158, 10));
}

#[test]
fn test_bottom_center_aligns_small_frames() {
    let fixture = FrameFolderFixture::new();
    fixture.add_frame(0, "Idle", 0, (8, 8));
    fixture.add_frame(0, "Idle", 1, (4, 2));
    let param = sheet_param(&fixture)
        .with_surrounding_margin(Margin::uniform(0))
        .with_image_margin(0);

    assemble(&param).unwrap();
    let sheet = open(&param.output_path);
    assert_eq!((sheet.width(), sheet.height()), (16, 8));

    // 4x2 frame in an 8x8 cell: dx = 2, dy = 6.
    assert!(is_blank(&sheet, 8, 0, 8, 6));
    assert_eq!(pixel(&sheet, 10, 6), frame_color(0, 1));
    assert_eq!(pixel(&sheet, 13, 7), frame_color(0, 1));
    assert!(is_blank(&sheet, 8, 6, 2, 2));
    assert!(is_blank(&sheet, 14, 6, 2, 2));
}

#[test]
fn test_wrapped_rows_label_only_first_chunk() {
    let fixture = FrameFolderFixture::new();
    fixture.add_frames(0, "Run", 7, (4, 4));
    let param = sheet_param(&fixture)
        .with_font_size(7)
        .with_align(SpriteAlign::TopLeft)
        .with_max_frames_per_row(3);

    let report = assemble(&param).unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(report.frames, 7);

    let sheet = open(&param.output_path);
    let first_frame_y = (0..sheet.height())
        .find(|&y| pixel(&sheet, 10, y) == frame_color(0, 0))
        .expect("first frame not painted");
    // Label block sits between the top margin and the label gap.
    let label_height = first_frame_y - 10 - 10;
    assert!(label_height > 0);

    // Every row reserves the label block, only the first draws text.
    let row_height = label_height + 10 + 4;
    assert_eq!(sheet.height(), 10 + 3 * row_height + 2 * 10 + 10);

    let white_rows: Vec<u32> = (0..sheet.height())
        .filter(|&y| (0..sheet.width()).any(|x| pixel(&sheet, x, y) == [255, 255, 255, 255]))
        .collect();
    assert!(!white_rows.is_empty(), "first row should carry the label");
    assert!(white_rows.iter().all(|&y| y >= 10 && y < first_frame_y));

    let second_row_frame_y = first_frame_y + 4 + 10 + label_height + 10;
    assert_eq!(pixel(&sheet, 10, second_row_frame_y), frame_color(0, 3));
}

#[test]
fn test_missing_parent_directories_are_created() {
    let fixture = walk_and_jump();
    let param = AssembleParam {
        output_path: fixture.path().join("deep/nested/dir/sheet.png"),
        ..sheet_param(&fixture)
    };

    assemble(&param).unwrap();
    assert!(param.output_path.is_file());
}

#[test]
fn test_sheet_as_jpeg_drops_alpha() {
    let fixture = walk_and_jump();
    let param = AssembleParam {
        output_path: fixture.output("sheet.jpg"),
        ..sheet_param(&fixture)
    };

    let report = assemble(&param).unwrap();
    assert_eq!(report.outputs[0].path, param.output_path);

    let sheet = open(&param.output_path);
    assert_eq!((sheet.width(), sheet.height()), (158, 190));
    assert!(!sheet.color().has_alpha());
}
