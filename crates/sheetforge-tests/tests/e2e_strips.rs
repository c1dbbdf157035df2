//! End-to-end tests for strips mode.

use pretty_assertions::assert_eq;
use sheetforge_assemble::assemble;
use sheetforge_spec::{AssembleParam, CombineMode, Margin, SpriteAlign, SpriteConsistency};
use sheetforge_tests::fixtures::frame_color;
use sheetforge_tests::harness::open;
use sheetforge_tests::{pixel, FrameFolderFixture};

fn strips_param(fixture: &FrameFolderFixture) -> AssembleParam {
    AssembleParam::new(&fixture.input, fixture.output("strips"))
        .with_font_size(0)
        .with_surrounding_margin(Margin::uniform(10))
        .with_label_margin(10)
        .with_image_margin(10)
        .with_consistency(SpriteConsistency::Row)
        .with_align(SpriteAlign::BottomCenter)
        .with_combine_mode(CombineMode::Strips)
}

fn file_names(report: &sheetforge_assemble::AssembleReport) -> Vec<String> {
    report
        .outputs
        .iter()
        .map(|o| o.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_one_strip_per_action() {
    let fixture = FrameFolderFixture::new();
    fixture.add_frames(0, "Walk", 2, (64, 64));
    fixture.add_frame(1, "Jump", 0, (64, 96));
    let param = strips_param(&fixture);

    let report = assemble(&param).unwrap();
    assert_eq!(file_names(&report), vec!["Walk.png", "Jump.png"]);

    let walk = open(&param.output_path.join("Walk.png"));
    assert_eq!((walk.width(), walk.height()), (158, 84));
    assert_eq!(pixel(&walk, 10, 10), frame_color(0, 0));
    assert_eq!(pixel(&walk, 84, 10), frame_color(0, 1));

    let jump = open(&param.output_path.join("Jump.png"));
    assert_eq!((jump.width(), jump.height()), (84, 116));
    assert_eq!(pixel(&jump, 10, 10), frame_color(1, 0));
}

#[test]
fn test_duplicate_labels_get_suffixes() {
    let fixture = FrameFolderFixture::new();
    fixture.add_frame(0, "Idle", 0, (8, 8));
    fixture.add_frame(1, "Idle", 0, (8, 8));
    let param = strips_param(&fixture);

    let report = assemble(&param).unwrap();
    assert_eq!(file_names(&report), vec!["Idle.png", "Idle_1.png"]);
    assert_eq!(pixel(&open(&report.outputs[0].path), 10, 10), frame_color(0, 0));
    assert_eq!(pixel(&open(&report.outputs[1].path), 10, 10), frame_color(1, 0));
}

#[test]
fn test_wrapped_action_writes_a_strip_per_chunk() {
    let fixture = FrameFolderFixture::new();
    fixture.add_frames(0, "Walk", 5, (4, 4));
    let param = strips_param(&fixture).with_max_frames_per_row(2);

    let report = assemble(&param).unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(file_names(&report), vec!["Walk.png", "Walk_1.png", "Walk_2.png"]);

    let last = open(&report.outputs[2].path);
    assert_eq!((last.width(), last.height()), (24, 24));
    assert_eq!(pixel(&last, 10, 10), frame_color(0, 4));
}

#[test]
fn test_empty_label_strip_is_untitled() {
    let fixture = FrameFolderFixture::new();
    fixture.add_frame(0, "", 0, (4, 4));
    let report = assemble(&strips_param(&fixture)).unwrap();
    assert_eq!(file_names(&report), vec!["Untitled.png"]);
}

#[test]
fn test_extension_selects_format() {
    let fixture = FrameFolderFixture::new();
    fixture.add_frame(0, "Idle", 0, (4, 4));
    let param = strips_param(&fixture).with_extension(".BMP");

    let report = assemble(&param).unwrap();
    assert_eq!(file_names(&report), vec!["Idle.bmp"]);
    assert_eq!(
        image::ImageFormat::from_path(&report.outputs[0].path).unwrap(),
        image::ImageFormat::Bmp
    );
    assert!(image::open(&report.outputs[0].path).is_ok());
}
