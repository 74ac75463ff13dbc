use super::*;

fn sample_preset() -> Preset {
    Preset {
        base_image: PathBuf::from("images/week.png"),
        style: Style {
            family: Some("Noto Sans JP".to_string()),
            font_path: Some(PathBuf::from("/fonts/NotoSansJP-Regular.otf")),
            font_size: 64,
            fill: Rgb8::new(0xff, 0xee, 0x00),
            stroke_fill: Rgb8::new(0x10, 0x20, 0x30),
            stroke_width: 3,
            line_spacing: 12,
        },
        positions: [
            IPoint::new(0, 0),
            IPoint::new(100, 5),
            IPoint::new(200, 10),
            IPoint::new(300, 15),
            IPoint::new(400, 20),
            IPoint::new(500, 25),
            IPoint::new(-6, 30),
        ],
    }
}

#[test]
fn json_roundtrip_is_exact() {
    let p = sample_preset();
    let text = p.to_json_string_pretty().unwrap();
    assert_eq!(Preset::from_json_str(&text).unwrap(), p);
}

#[test]
fn document_shape_matches_file_format() {
    let v = serde_json::to_value(sample_preset()).unwrap();
    assert_eq!(v["base_image"], "images/week.png");
    assert_eq!(v["style"]["fill"], "#ffee00");
    assert_eq!(v["style"]["stroke_fill"], "#102030");
    assert_eq!(v["style"]["font_size"], 64);
    assert_eq!(v["positions"][1], serde_json::json!([100, 5]));
    assert_eq!(v["positions"].as_array().unwrap().len(), 7);
}

#[test]
fn missing_style_fields_take_defaults() {
    let text = r#"{
        "base_image": "a.png",
        "style": {"font_path": "/f.ttf", "unknown": true},
        "positions": [[0,0],[1,1],[2,2],[3,3],[4,4],[5,5],[6,6]]
    }"#;
    let p = Preset::from_json_str(text).unwrap();
    assert_eq!(p.style.family, None);
    assert_eq!(p.style.font_size, 72);
    assert_eq!(p.style.fill, Rgb8::WHITE);
    assert_eq!(p.style.stroke_fill, Rgb8::BLACK);
    assert_eq!(p.style.stroke_width, 2);
    assert_eq!(p.style.line_spacing, 8);
}

#[test]
fn missing_style_object_uses_default_style() {
    let text = r#"{"base_image": "a.png",
        "positions": [[0,0],[1,1],[2,2],[3,3],[4,4],[5,5],[6,6]]}"#;
    assert_eq!(Preset::from_json_str(text).unwrap().style, Style::default());
}

#[test]
fn null_family_and_font_path_are_accepted() {
    let text = r#"{"base_image": "a.png",
        "style": {"family": null, "font_path": null},
        "positions": [[0,0],[1,1],[2,2],[3,3],[4,4],[5,5],[6,6]]}"#;
    let p = Preset::from_json_str(text).unwrap();
    assert!(p.style.font_path.is_none());
}

#[test]
fn wrong_position_count_is_invalid() {
    let text = r#"{"base_image": "a.png", "positions": [[0,0],[1,1]]}"#;
    let err = Preset::from_json_str(text).unwrap_err();
    assert!(matches!(err, crate::TelopError::InvalidPreset(_)));
}

#[test]
fn missing_positions_or_base_image_is_invalid() {
    assert!(Preset::from_json_str(r#"{"base_image": "a.png"}"#).is_err());
    assert!(
        Preset::from_json_str(r#"{"positions": [[0,0],[1,1],[2,2],[3,3],[4,4],[5,5],[6,6]]}"#)
            .is_err()
    );
}

#[test]
fn malformed_color_is_invalid() {
    let text = r#"{"base_image": "a.png", "style": {"fill": "white"},
        "positions": [[0,0],[1,1],[2,2],[3,3],[4,4],[5,5],[6,6]]}"#;
    assert!(matches!(
        Preset::from_json_str(text).unwrap_err(),
        crate::TelopError::InvalidPreset(_)
    ));
}

#[test]
fn non_ascii_text_is_not_escaped() {
    let mut p = sample_preset();
    p.style.family = Some("游ゴシック".to_string());
    let text = p.to_json_string_pretty().unwrap();
    assert!(text.contains("游ゴシック"));
}
