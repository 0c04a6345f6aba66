//! Quadratic Bezier curves between two map points.

use geo::{Coord, Point};

/// Default number of segments a curve is sampled into.
pub const DEFAULT_CURVE_SEGMENTS: usize = 50;

/// Unit normal of the chord `start -> end`, rotated a quarter turn
/// counter-clockwise. `None` for a degenerate chord.
pub fn unit_normal(start: Point, end: Point) -> Option<Coord> {
    let d = end.0 - start.0;
    let length = d.x.hypot(d.y);
    if length == 0.0 || !length.is_finite() {
        return None;
    }

    Some(Coord {
        x: -d.y / length,
        y: d.x / length,
    })
}

/// Unit normal of the chord taken from its lexicographically smaller
/// endpoint, so `a -> b` and `b -> a` share one normal.
pub fn canonical_normal(a: Point, b: Point) -> Option<Coord> {
    if (a.x(), a.y()) > (b.x(), b.y()) {
        unit_normal(b, a)
    } else {
        unit_normal(a, b)
    }
}

/// Control point displaced from the chord midpoint along `normal` by
/// `offset` chord lengths.
pub fn control_point(start: Point, end: Point, normal: Coord, offset: f64) -> Point {
    let d = end.0 - start.0;
    let length = d.x.hypot(d.y);
    let midpoint = (start.0 + end.0) / 2.0;

    Point::from(midpoint + normal * (offset * length))
}

/// Sample the quadratic Bezier `start -> control -> end` at `segments + 1`
/// evenly spaced parameter values. Both endpoints are reproduced exactly.
pub fn quadratic_bezier(start: Point, control: Point, end: Point, segments: usize) -> Vec<Point> {
    let segments = segments.max(1);

    (0..=segments)
        .map(|i| {
            if i == 0 {
                return start;
            }
            if i == segments {
                return end;
            }

            let t = i as f64 / segments as f64;
            let u = 1.0 - t;
            Point::from(start.0 * (u * u) + control.0 * (2.0 * u * t) + end.0 * (t * t))
        })
        .collect()
}
