use crate::foundation::{
    core::{Canvas, Point},
    error::{StrokecastError, StrokecastResult},
};

/// The shapes an animation can draw.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Ring swept clockwise from twelve o'clock.
    Circle,
    /// Closed square traced clockwise from the top-left corner.
    Square,
    /// Closed equilateral triangle traced clockwise from the apex.
    Triangle,
    /// Three open strokes: TL→BR, BR→TR, TR→BL.
    Cancel,
}

impl ShapeKind {
    /// Lowercase name, also used for default output file names.
    pub fn name(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::Cancel => "cancel",
        }
    }
}

/// A straight piece of a shape's path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    /// Where the pen enters the segment.
    pub start: Point,
    /// Where the pen leaves the segment.
    pub end: Point,
}

impl Segment {
    /// Create a segment from `start` to `end`.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Euclidean length in pixels.
    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }
}

/// Precomputed geometry of one shape, read-only during frame generation.
///
/// Polygon points are stored in traversal order; that order defines where along the
/// perimeter a given progress lands.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeDescriptor {
    /// Circle swept clockwise from the top.
    Arc {
        /// Circle center.
        center: Point,
        /// Outer radius of the drawn ring.
        radius: f64,
    },
    /// Path that ends at its last point.
    OpenPath {
        /// Vertices in drawing order.
        points: Vec<Point>,
    },
    /// Path whose last point connects back to the first.
    ClosedPolygon {
        /// Vertices in drawing order; the closing edge is implied.
        points: Vec<Point>,
    },
}

impl ShapeDescriptor {
    /// Build the descriptor for `kind`, centered on `canvas`.
    ///
    /// `size` is the radius for circles and the side length otherwise. `height` only applies
    /// to the cancel-mark and defaults to `size`.
    pub fn new(
        kind: ShapeKind,
        canvas: Canvas,
        size: f64,
        height: Option<f64>,
    ) -> StrokecastResult<Self> {
        check_dimension("size", size)?;
        if let Some(h) = height {
            check_dimension("height", h)?;
        }

        let c = canvas.center();
        let shape = match kind {
            ShapeKind::Circle => Self::Arc {
                center: c,
                radius: size,
            },
            ShapeKind::Square => {
                let half = size / 2.0;
                Self::ClosedPolygon {
                    points: vec![
                        Point::new(c.x - half, c.y - half),
                        Point::new(c.x + half, c.y - half),
                        Point::new(c.x + half, c.y + half),
                        Point::new(c.x - half, c.y + half),
                    ],
                }
            }
            ShapeKind::Triangle => {
                let half = size / 2.0;
                let half_h = 3f64.sqrt() / 2.0 * size / 2.0;
                Self::ClosedPolygon {
                    points: vec![
                        Point::new(c.x, c.y - half_h),
                        Point::new(c.x + half, c.y + half_h),
                        Point::new(c.x - half, c.y + half_h),
                    ],
                }
            }
            ShapeKind::Cancel => {
                let half_w = size / 2.0;
                let half_h = height.unwrap_or(size) / 2.0;
                Self::OpenPath {
                    points: vec![
                        Point::new(c.x - half_w, c.y - half_h),
                        Point::new(c.x + half_w, c.y + half_h),
                        Point::new(c.x + half_w, c.y - half_h),
                        Point::new(c.x - half_w, c.y + half_h),
                    ],
                }
            }
        };
        shape.validate()?;
        Ok(shape)
    }

    /// Reject geometry that would divide by zero during the perimeter walk.
    pub fn validate(&self) -> StrokecastResult<()> {
        match self {
            Self::Arc { radius, .. } => check_dimension("radius", *radius),
            Self::OpenPath { points } | Self::ClosedPolygon { points } => {
                if points.len() < 2 {
                    return Err(StrokecastError::shape(format!(
                        "path needs at least 2 points, got {}",
                        points.len()
                    )));
                }
                if points.iter().any(|p| !p.is_finite()) {
                    return Err(StrokecastError::shape("path points must be finite"));
                }
                let perimeter = self.perimeter();
                if perimeter <= 0.0 {
                    return Err(StrokecastError::shape("path perimeter is zero"));
                }
                Ok(())
            }
        }
    }

    /// Segments in traversal order. Empty for arcs.
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            Self::Arc { .. } => Vec::new(),
            Self::OpenPath { points } => points
                .windows(2)
                .map(|w| Segment::new(w[0], w[1]))
                .collect(),
            Self::ClosedPolygon { points } => (0..points.len())
                .map(|i| Segment::new(points[i], points[(i + 1) % points.len()]))
                .collect(),
        }
    }

    /// Total drawn length: circumference for arcs, summed segment lengths otherwise.
    pub fn perimeter(&self) -> f64 {
        match self {
            Self::Arc { radius, .. } => std::f64::consts::TAU * radius,
            _ => self.segments().iter().map(Segment::length).sum(),
        }
    }

    /// Where drawing begins; marked with a cap on every frame.
    pub fn start_point(&self) -> Point {
        match self {
            Self::Arc { center, radius } => Point::new(center.x, center.y - radius),
            Self::OpenPath { points } | Self::ClosedPolygon { points } => points[0],
        }
    }
}

fn check_dimension(what: &str, v: f64) -> StrokecastResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(StrokecastError::shape(format!(
            "{what} must be a positive finite number, got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/shape/descriptor.rs"]
mod tests;
