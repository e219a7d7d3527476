use kurbo::Point;

/// Tolerance for length and ratio comparisons in pixel space.
pub(crate) const EPSILON: f64 = 1e-9;

/// Point at `t` along the line from `a` to `b`.
pub(crate) fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y))
}

pub(crate) fn approx_eq_point(a: Point, b: Point) -> bool {
    (a - b).hypot() <= 1e-6
}

/// Recover a straight-alpha channel from a premultiplied one.
pub(crate) fn unpremul_u8(c: u8, a: u8) -> u8 {
    if a == 0 {
        return 0;
    }
    let v = (u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a);
    v.min(255) as u8
}
