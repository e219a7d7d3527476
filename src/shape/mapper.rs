//! Progress-to-geometry mapping.
//!
//! Turns a [`Progress`] into the concrete strokes a frame must draw: a sweep for arcs, or a
//! perimeter walk for paths that ends in a truncated segment.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    foundation::{
        core::{Point, Progress},
        math::{EPSILON, approx_eq_point, lerp_point},
    },
    shape::descriptor::{Segment, ShapeDescriptor},
};

/// Partial circle, clockwise in y-down screen space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ArcSweep {
    /// Circle center.
    pub center: Point,
    /// Outer radius; the stroke's outer edge sits on this circle.
    pub radius: f64,
    /// Radians. Always `-PI/2` (top of the circle).
    pub start_angle: f64,
    /// Radians in `[0, TAU]`.
    pub sweep_angle: f64,
}

impl ArcSweep {
    /// Angle where the pen currently is.
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    /// Point at `angle` on the circle of radius `radius - inset`.
    pub fn point_at(&self, angle: f64, inset: f64) -> Point {
        let r = self.radius - inset;
        Point::new(
            self.center.x + r * angle.cos(),
            self.center.y + r * angle.sin(),
        )
    }

    /// Start and current end points, pulled in by `inset` so caps sit on the stroke.
    pub fn cap_points(&self, inset: f64) -> Vec<Point> {
        let start = self.point_at(self.start_angle, inset);
        let end = self.point_at(self.end_angle(), inset);
        let mut caps = vec![start];
        push_unique(&mut caps, end);
        caps
    }

    /// Length of the drawn arc measured on the outer radius.
    pub fn covered_length(&self) -> f64 {
        self.radius * self.sweep_angle
    }
}

/// How far along a segmented path a frame has drawn.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct PathProgress {
    /// Segments drawn end to end.
    pub full: Vec<Segment>,
    /// The segment being drawn, cut at the current progress.
    pub partial: Option<Segment>,
    /// Centers of the round caps: start point, joints, and the current pen position.
    pub caps: Vec<Point>,
}

impl PathProgress {
    /// Length of everything drawn so far.
    pub fn covered_length(&self) -> f64 {
        self.full.iter().map(Segment::length).sum::<f64>()
            + self.partial.as_ref().map_or(0.0, Segment::length)
    }

    /// Everything to stroke, in drawing order.
    pub fn strokes(&self) -> impl Iterator<Item = &Segment> {
        self.full.iter().chain(self.partial.iter())
    }
}

/// Geometry of a single frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrokeGeometry {
    /// Circle drawn as a growing sweep.
    Arc(ArcSweep),
    /// Polygon or open path drawn segment by segment.
    Path(PathProgress),
}

impl StrokeGeometry {
    /// Length of everything drawn so far.
    pub fn covered_length(&self) -> f64 {
        match self {
            Self::Arc(arc) => arc.covered_length(),
            Self::Path(path) => path.covered_length(),
        }
    }
}

/// Map `progress` onto `shape`.
pub fn map_progress(shape: &ShapeDescriptor, progress: Progress) -> StrokeGeometry {
    match shape {
        ShapeDescriptor::Arc { center, radius } => StrokeGeometry::Arc(ArcSweep {
            center: *center,
            radius: *radius,
            start_angle: -FRAC_PI_2,
            sweep_angle: progress.get() * TAU,
        }),
        ShapeDescriptor::OpenPath { .. } | ShapeDescriptor::ClosedPolygon { .. } => {
            StrokeGeometry::Path(walk_perimeter(
                shape.start_point(),
                &shape.segments(),
                progress,
            ))
        }
    }
}

/// Walk `segments` until `progress` of the total length is covered.
///
/// A segment stops the walk once `accumulated + length >= covered`; it is emitted truncated
/// even when the cut lands exactly on its end (or start). Only a finished path (progress 1)
/// is emitted without a truncated segment.
pub fn walk_perimeter(start: Point, segments: &[Segment], progress: Progress) -> PathProgress {
    let mut out = PathProgress {
        caps: vec![start],
        ..PathProgress::default()
    };

    if progress.is_done() {
        for seg in segments {
            out.full.push(*seg);
            push_unique(&mut out.caps, seg.end);
        }
        return out;
    }

    let perimeter: f64 = segments.iter().map(Segment::length).sum();
    let covered = progress.get() * perimeter;
    let mut accumulated = 0.0;

    for seg in segments {
        let len = seg.length();
        if accumulated + len >= covered {
            let ratio = if len > EPSILON {
                ((covered - accumulated) / len).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let cut = Segment::new(seg.start, lerp_point(seg.start, seg.end, ratio));
            push_unique(&mut out.caps, cut.end);
            out.partial = Some(cut);
            break;
        }
        out.full.push(*seg);
        push_unique(&mut out.caps, seg.end);
        accumulated += len;
    }
    out
}

fn push_unique(caps: &mut Vec<Point>, p: Point) {
    if !caps.iter().any(|&c| approx_eq_point(c, p)) {
        caps.push(p);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/mapper.rs"]
mod tests;
