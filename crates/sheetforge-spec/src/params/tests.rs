use pretty_assertions::assert_eq;

use super::*;
use crate::error::SpecError;

#[test]
fn test_assemble_param_defaults_from_minimal_json() {
    let json = r#"{ "input_folder_path": "renders", "output_path": "sheet.png" }"#;
    let param = AssembleParam::from_json(json).unwrap();

    assert_eq!(param, AssembleParam::new("renders", "sheet.png"));
    assert_eq!(param.font_size, 24);
    assert_eq!(param.surrounding_margin, Margin::uniform(15));
    assert_eq!(param.label_margin, 15);
    assert_eq!(param.image_margin, 15);
    assert_eq!(param.consistency, SpriteConsistency::Individual);
    assert_eq!(param.align, SpriteAlign::BottomCenter);
    assert_eq!(param.combine_mode, CombineMode::Sheet);
    assert_eq!(param.max_frames_per_row, 0);
    assert_eq!(param.extension, "png");
}

#[test]
fn test_assemble_param_full_json() {
    let json = r#"{
        "input_folder_path": "in",
        "output_path": "out",
        "font_size": 0,
        "surrounding_margin": { "top": 1, "right": 2, "bottom": 3, "left": 4 },
        "label_margin": 5,
        "image_margin": 6,
        "consistency": "all",
        "align": "middle_right",
        "combine_mode": "strips",
        "max_frames_per_row": 8,
        "extension": "tga"
    }"#;
    let param = AssembleParam::from_json(json).unwrap();

    assert_eq!(param.surrounding_margin, Margin::new(1, 2, 3, 4));
    assert_eq!(param.consistency, SpriteConsistency::All);
    assert_eq!(param.align, SpriteAlign::MiddleRight);
    assert_eq!(param.combine_mode, CombineMode::Strips);
    assert_eq!(param.max_frames_per_row, 8);
    assert!(!param.labels_enabled());
}

#[test]
fn test_assemble_param_rejects_unknown_fields() {
    let json = r#"{ "input_folder_path": "a", "output_path": "b", "margin": 3 }"#;
    assert!(matches!(
        AssembleParam::from_json(json),
        Err(SpecError::JsonParse(_))
    ));
}

#[test]
fn test_assemble_param_json_roundtrip_keeps_enums_snake_case() {
    let param = AssembleParam::new("a", "b")
        .with_align(SpriteAlign::TopLeft)
        .with_combine_mode(CombineMode::Images);
    let json = param.to_json_pretty().unwrap();

    assert!(json.contains("\"top_left\""));
    assert!(json.contains("\"images\""));
    assert_eq!(AssembleParam::from_json(&json).unwrap(), param);
}

#[test]
fn test_align_components_cover_cross_product() {
    let mut seen = std::collections::HashSet::new();
    for align in SpriteAlign::ALL {
        seen.insert((align.horizontal(), align.vertical()));
    }
    assert_eq!(seen.len(), 9);

    assert_eq!(SpriteAlign::BottomRight.horizontal(), HorizontalAlign::Right);
    assert_eq!(SpriteAlign::BottomRight.vertical(), VerticalAlign::Bottom);
    assert_eq!(SpriteAlign::MiddleCenter.horizontal(), HorizontalAlign::Center);
    assert_eq!(SpriteAlign::MiddleCenter.vertical(), VerticalAlign::Middle);
}

#[test]
fn test_align_from_str_accepts_separators() {
    assert_eq!(
        "bottom-center".parse::<SpriteAlign>().unwrap(),
        SpriteAlign::BottomCenter
    );
    assert_eq!(
        "Top Right".parse::<SpriteAlign>().unwrap(),
        SpriteAlign::TopRight
    );
    assert!("upper_left".parse::<SpriteAlign>().is_err());
}

#[test]
fn test_enum_from_str() {
    assert_eq!(
        "ROW".parse::<SpriteConsistency>().unwrap(),
        SpriteConsistency::Row
    );
    assert_eq!("images".parse::<CombineMode>().unwrap(), CombineMode::Images);
    assert_eq!(
        "bicubic".parse::<ShrinkInterp>().unwrap(),
        ShrinkInterp::Bicubic
    );
    assert!("grid".parse::<CombineMode>().is_err());
}

#[test]
fn test_margin_from_str() {
    assert_eq!("10".parse::<Margin>().unwrap(), Margin::uniform(10));
    assert_eq!(
        "1, 2, 3, 4".parse::<Margin>().unwrap(),
        Margin::new(1, 2, 3, 4)
    );
    assert!("1,2".parse::<Margin>().is_err());
    assert!("-1".parse::<Margin>().is_err());

    let m = Margin::new(1, 2, 3, 4);
    assert_eq!(m.horizontal(), 6);
    assert_eq!(m.vertical(), 4);
}

#[test]
fn test_pixelate_param_defaults() {
    let param = PixelateParam::from_json("{}").unwrap();
    assert_eq!(param, PixelateParam::default());
    assert_eq!(param.pixelation_amount, 0.9);
    assert_eq!(param.color_amount, 50.0);
    assert_eq!(param.alpha_step, 0.25);
    assert_eq!(param.shrink_interp, ShrinkInterp::Nearest);
}

#[test]
fn test_paths_may_come_from_elsewhere() {
    let param = AssembleParam::from_json(r#"{ "font_size": 0 }"#).unwrap();
    assert!(param.input_folder_path.as_os_str().is_empty());
    assert!(param.output_path.as_os_str().is_empty());
    assert!(!param.labels_enabled());
}
