use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 400,
        height: 400,
    }
}

#[test]
fn square_vertices_run_clockwise_from_top_left() {
    let shape = ShapeDescriptor::new(ShapeKind::Square, canvas(), 350.0, None).unwrap();
    let ShapeDescriptor::ClosedPolygon { points } = &shape else {
        panic!("square must be a closed polygon");
    };
    assert_eq!(
        points,
        &vec![
            Point::new(25.0, 25.0),
            Point::new(375.0, 25.0),
            Point::new(375.0, 375.0),
            Point::new(25.0, 375.0),
        ]
    );
    assert_eq!(shape.segments().len(), 4);
    assert_eq!(shape.perimeter(), 1400.0);
    assert_eq!(shape.start_point(), Point::new(25.0, 25.0));
}

#[test]
fn triangle_is_equilateral() {
    let shape = ShapeDescriptor::new(ShapeKind::Triangle, canvas(), 350.0, None).unwrap();
    let segs = shape.segments();
    assert_eq!(segs.len(), 3);
    for s in &segs {
        assert!((s.length() - 350.0).abs() < 1e-9, "side {}", s.length());
    }
    assert_eq!(shape.start_point().x, 200.0);
    assert!(shape.start_point().y < 200.0);
}

#[test]
fn cancel_mark_is_open_with_three_segments() {
    let shape = ShapeDescriptor::new(ShapeKind::Cancel, canvas(), 350.0, None).unwrap();
    assert!(matches!(shape, ShapeDescriptor::OpenPath { .. }));
    let segs = shape.segments();
    assert_eq!(segs.len(), 3);
    assert_eq!(segs[0].start, Point::new(25.0, 25.0));
    assert_eq!(segs[0].end, Point::new(375.0, 375.0));
    assert_eq!(segs[1].end, Point::new(375.0, 25.0));
    assert_eq!(segs[2].end, Point::new(25.0, 375.0));
    assert_ne!(segs[2].end, segs[0].start);
}

#[test]
fn cancel_mark_honors_separate_height() {
    let shape = ShapeDescriptor::new(ShapeKind::Cancel, canvas(), 300.0, Some(100.0)).unwrap();
    let segs = shape.segments();
    assert_eq!(segs[0].start, Point::new(50.0, 150.0));
    assert_eq!(segs[0].end, Point::new(350.0, 250.0));
    assert_eq!(segs[1].length(), 100.0);
}

#[test]
fn circle_starts_at_top() {
    let shape = ShapeDescriptor::new(ShapeKind::Circle, canvas(), 200.0, None).unwrap();
    assert_eq!(shape.start_point(), Point::new(200.0, 0.0));
    assert!(shape.segments().is_empty());
    assert!((shape.perimeter() - std::f64::consts::TAU * 200.0).abs() < 1e-9);
}

#[test]
fn degenerate_sizes_are_rejected() {
    for size in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        for kind in [
            ShapeKind::Circle,
            ShapeKind::Square,
            ShapeKind::Triangle,
            ShapeKind::Cancel,
        ] {
            let err = ShapeDescriptor::new(kind, canvas(), size, None).unwrap_err();
            assert!(matches!(err, StrokecastError::InvalidShapeConfig(_)));
        }
    }
    assert!(ShapeDescriptor::new(ShapeKind::Cancel, canvas(), 10.0, Some(0.0)).is_err());
}

#[test]
fn zero_length_perimeter_is_rejected() {
    let p = Point::new(5.0, 5.0);
    let shape = ShapeDescriptor::OpenPath { points: vec![p, p] };
    assert!(matches!(
        shape.validate(),
        Err(StrokecastError::InvalidShapeConfig(_))
    ));
    let single = ShapeDescriptor::ClosedPolygon { points: vec![p] };
    assert!(single.validate().is_err());
}
