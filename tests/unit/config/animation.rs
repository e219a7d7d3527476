use super::*;

fn circle_def() -> AnimationDef {
    AnimationDef::reference_set("out").remove(0)
}

#[test]
fn reference_set_matches_stock_parameters() {
    let defs = AnimationDef::reference_set("images");
    let names: Vec<_> = defs.iter().map(|d| d.out.clone()).collect();
    assert_eq!(
        names,
        vec![
            PathBuf::from("images/circle.gif"),
            PathBuf::from("images/square.gif"),
            PathBuf::from("images/triangle.gif"),
            PathBuf::from("images/cancel.gif"),
        ]
    );
    assert_eq!(defs[0].size, 200.0);
    assert_eq!(defs[3].stroke.color, Rgba8::CANCEL_RED);
    for d in &defs {
        let spec = AnimationSpec::from_def(d).unwrap();
        assert_eq!(spec.total_frames(), 81);
        assert_eq!(spec.frame_delay_ms, 50);
    }
}

#[test]
fn json_defaults_fill_timing_fields() {
    let json = r##"{
        "canvas": { "width": 120, "height": 80 },
        "shape": "triangle",
        "size": 60,
        "stroke": { "width": 6, "color": "#24b55c" },
        "out": "tri.gif"
    }"##;
    let def = AnimationDef::from_reader(json.as_bytes()).unwrap();
    assert_eq!(def.frame_count, DEFAULT_FRAME_COUNT);
    assert_eq!(def.hold_frames, DEFAULT_HOLD_FRAMES);
    assert_eq!(def.frame_delay_ms, DEFAULT_FRAME_DELAY_MS);
    assert_eq!(def.stroke.color, Rgba8::CONFIRM_GREEN);

    let spec = AnimationSpec::from_def(&def).unwrap();
    assert!(matches!(spec.shape, ShapeDescriptor::ClosedPolygon { .. }));
}

#[test]
fn json_round_trips() {
    let def = circle_def();
    let json = def.to_json_pretty().unwrap();
    let back = AnimationDef::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, def);
}

#[test]
fn unknown_fields_and_bad_shapes_fail_to_parse() {
    let json = r#"{ "canvas": { "width": 1, "height": 1 }, "shape": "hexagon", "size": 1,
        "stroke": { "width": 1, "color": [0, 0, 0] }, "out": "x.gif" }"#;
    let err = AnimationDef::from_reader(json.as_bytes()).unwrap_err();
    assert!(matches!(err, StrokecastError::Serde(_)));
}

#[test]
fn validation_happens_before_rendering() {
    let mut def = circle_def();
    def.frame_count = 0;
    assert!(matches!(
        AnimationSpec::from_def(&def),
        Err(StrokecastError::Validation(_))
    ));

    let mut def = circle_def();
    def.size = 0.0;
    assert!(matches!(
        AnimationSpec::from_def(&def),
        Err(StrokecastError::InvalidShapeConfig(_))
    ));

    let mut def = circle_def();
    def.stroke.width = 0;
    assert!(AnimationSpec::from_def(&def).is_err());

    let mut def = circle_def();
    def.height = Some(10.0);
    assert!(AnimationSpec::from_def(&def).is_err());

    let mut def = circle_def();
    def.canvas.width = 0;
    assert!(AnimationSpec::from_def(&def).is_err());
}

#[test]
fn oversized_stroke_is_allowed() {
    let mut def = circle_def();
    def.stroke.width = 500;
    assert!(AnimationSpec::from_def(&def).is_ok());
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = AnimationSpec::from_path("target/does/not/exist.json").unwrap_err();
    assert!(matches!(err, StrokecastError::Validation(_)));
}
