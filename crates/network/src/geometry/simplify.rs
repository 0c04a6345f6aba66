//! Douglas-Peucker path simplification.
//!
//! Works on planar (longitude, latitude) coordinates, so `tolerance` is in
//! degrees. Endpoints are always kept and the output is a subsequence of the
//! input, which makes the result stable under repeated application.

use geo::{LineString, Point, Simplify};

use crate::models::types::GeoPath;

/// Reduce `points` to those needed to stay within `tolerance` of the original
/// shape. Paths of two points or fewer, and non-finite or negative
/// tolerances, return the input unchanged. A zero tolerance keeps every point.
pub fn simplify(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() <= 2 || !tolerance.is_finite() || tolerance < 0.0 {
        return points.to_vec();
    }

    LineString::from(points.to_vec())
        .simplify(&tolerance)
        .points()
        .collect()
}

/// Simplified copy of a path. Empty paths stay empty.
pub fn simplify_path(path: &GeoPath, tolerance: f64) -> GeoPath {
    let points = simplify(path.points(), tolerance);
    // A subsequence of valid points that keeps both endpoints is still valid.
    GeoPath::new(path.owner(), points).unwrap_or_else(|_| path.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::PipelineId;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_short_paths_unchanged() {
        let two = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(simplify(&two, 10.0), two);
        assert!(simplify(&[], 1.0).is_empty());
    }

    #[test]
    fn test_collinear_points_collapse() {
        let line = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(simplify(&line, 0.001), pts(&[(0.0, 0.0), (3.0, 3.0)]));
    }

    #[test]
    fn test_significant_corner_kept() {
        let corner = pts(&[(0.0, 0.0), (1.0, 0.01), (2.0, 0.0), (2.0, 2.0)]);
        let simplified = simplify(&corner, 0.1);
        assert_eq!(simplified, pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0)]));
    }

    #[test]
    fn test_zero_tolerance_keeps_every_deviation() {
        let zigzag = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
        assert_eq!(simplify(&zigzag, 0.0), zigzag);
    }

    #[test]
    fn test_invalid_tolerance_returns_input() {
        let zigzag = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
        assert_eq!(simplify(&zigzag, f64::NAN), zigzag);
        assert_eq!(simplify(&zigzag, -1.0), zigzag);
    }

    #[test]
    fn test_idempotent() {
        let wiggle: Vec<Point> = (0..200)
            .map(|i| {
                let x = i as f64 * 0.05;
                Point::new(x, (x * 1.7).sin() * 0.4 + (x * 9.0).cos() * 0.03)
            })
            .collect();

        for tolerance in [0.0, 0.01, 0.05, 0.2, 1.0] {
            let once = simplify(&wiggle, tolerance);
            let twice = simplify(&once, tolerance);
            assert_eq!(once, twice, "tolerance {tolerance}");
            assert_eq!(once.first(), wiggle.first());
            assert_eq!(once.last(), wiggle.last());
        }
    }

    #[test]
    fn test_zero_tolerance_keeps_collinear_points() {
        let line = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(simplify(&line, 0.0), line);
    }

    #[test]
    fn test_simplify_path_keeps_owner() {
        let owner = PipelineId::new(9);
        let path = GeoPath::new(owner, pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])).unwrap();

        let simplified = simplify_path(&path, 0.01);
        assert_eq!(simplified.owner(), owner);
        assert_eq!(simplified.len(), 2);
        assert!(simplify_path(&GeoPath::empty(owner), 0.01).is_empty());
    }
}
