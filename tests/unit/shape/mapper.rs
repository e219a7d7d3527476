use super::*;
use crate::foundation::core::Canvas;
use crate::shape::descriptor::ShapeKind;

fn shape(kind: ShapeKind) -> ShapeDescriptor {
    let canvas = Canvas {
        width: 400,
        height: 400,
    };
    let size = if kind == ShapeKind::Circle { 200.0 } else { 350.0 };
    ShapeDescriptor::new(kind, canvas, size, None).unwrap()
}

fn path(kind: ShapeKind, p: f64) -> PathProgress {
    match map_progress(&shape(kind), Progress::new(p).unwrap()) {
        StrokeGeometry::Path(path) => path,
        StrokeGeometry::Arc(_) => panic!("{kind:?} should map to a path"),
    }
}

fn arc(p: f64) -> ArcSweep {
    match map_progress(&shape(ShapeKind::Circle), Progress::new(p).unwrap()) {
        StrokeGeometry::Arc(arc) => arc,
        StrokeGeometry::Path(_) => panic!("circle should map to an arc"),
    }
}

#[test]
fn start_frame_is_only_the_start_cap() {
    for kind in [ShapeKind::Square, ShapeKind::Triangle, ShapeKind::Cancel] {
        let p = path(kind, 0.0);
        assert!(p.full.is_empty());
        assert_eq!(p.covered_length(), 0.0);
        assert_eq!(p.caps, vec![shape(kind).start_point()]);
    }

    let a = arc(0.0);
    assert_eq!(a.sweep_angle, 0.0);
    assert_eq!(a.cap_points(15.0).len(), 1);
}

#[test]
fn finished_frame_has_no_truncated_segment() {
    for kind in [ShapeKind::Square, ShapeKind::Triangle, ShapeKind::Cancel] {
        let s = shape(kind);
        let p = path(kind, 1.0);
        assert!(p.partial.is_none());
        assert_eq!(p.full, s.segments());
        assert!((p.covered_length() - s.perimeter()).abs() < 1e-9);
    }
    assert!((arc(1.0).sweep_angle - TAU).abs() < 1e-12);
}

#[test]
fn square_quarter_mark_draws_exactly_one_side() {
    let p = path(ShapeKind::Square, 0.25);
    let strokes: Vec<_> = p.strokes().collect();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].start, Point::new(25.0, 25.0));
    assert_eq!(strokes[0].end, Point::new(375.0, 25.0));
    assert_eq!(p.caps, vec![Point::new(25.0, 25.0), Point::new(375.0, 25.0)]);
    assert!((p.covered_length() - 350.0).abs() < 1e-9);
}

#[test]
fn truncation_point_lies_on_the_segment_at_the_ratio() {
    let p = path(ShapeKind::Square, 0.3);
    assert_eq!(p.full.len(), 1);
    let cut = p.partial.expect("partial segment");
    assert_eq!(cut.start, Point::new(375.0, 25.0));
    // 0.3 * 1400 = 420, 70 px into the right side.
    assert!((cut.end.x - 375.0).abs() < 1e-9);
    assert!((cut.end.y - 95.0).abs() < 1e-9);
    assert_eq!(p.caps.last().copied(), Some(cut.end));

    let tri = path(ShapeKind::Triangle, 0.5);
    let cut = tri.partial.expect("partial segment");
    let seg = shape(ShapeKind::Triangle).segments()[1];
    let ratio = (cut.end - seg.start).hypot() / seg.length();
    assert!((ratio - 0.5).abs() < 1e-9);
    let cross = (seg.end - seg.start).cross(cut.end - seg.start);
    assert!(cross.abs() < 1e-6);
}

#[test]
fn cancel_mark_finishes_with_four_caps_and_no_wrap() {
    let s = shape(ShapeKind::Cancel);
    let ShapeDescriptor::OpenPath { points } = &s else {
        panic!("cancel must be an open path");
    };
    let p = path(ShapeKind::Cancel, 1.0);
    assert_eq!(p.full.len(), 3);
    assert_eq!(&p.caps, points);
    assert_ne!(p.full[2].end, p.full[0].start);
}

#[test]
fn closed_square_does_not_repeat_the_start_cap() {
    let p = path(ShapeKind::Square, 1.0);
    assert_eq!(p.full.len(), 4);
    assert_eq!(p.caps.len(), 4);
    assert_eq!(p.full[3].end, p.full[0].start);
}

#[test]
fn covered_length_is_monotonic() {
    for kind in [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Cancel,
    ] {
        let s = shape(kind);
        let mut last = -1.0;
        for i in 0..=60 {
            let g = map_progress(&s, Progress::sample(i, 60).unwrap());
            let len = g.covered_length();
            assert!(len >= last - 1e-9, "{kind:?} regressed at sample {i}");
            last = len;
        }
        assert!((last - s.perimeter()).abs() < 1e-6);
    }
}

#[test]
fn half_circle_spans_180_degrees_clockwise_from_top() {
    let a = arc(0.5);
    assert_eq!(a.start_angle, -FRAC_PI_2);
    assert!((a.sweep_angle - std::f64::consts::PI).abs() < 1e-12);

    let caps = a.cap_points(15.0);
    assert_eq!(caps.len(), 2);
    assert!((caps[0].x - 200.0).abs() < 1e-9);
    assert!((caps[0].y - 15.0).abs() < 1e-9);
    assert!((caps[1].x - 200.0).abs() < 1e-9);
    assert!((caps[1].y - 385.0).abs() < 1e-9);

    // Clockwise in y-down space passes through the right-hand side first.
    let quarter = a.point_at(a.start_angle + FRAC_PI_2, 0.0);
    assert!((quarter.x - 400.0).abs() < 1e-9);
}
