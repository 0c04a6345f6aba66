//! Spatial query utilities for distance calculations.
//!
//! Uses Haversine formula for accurate distances on Earth's surface.

use geo::{ClosestPoint, HaversineDistance, HaversineLength, Line, LineString, Point};

use crate::models::types::GeoPath;

/// Calculate Haversine distance between two points in meters
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    p1.haversine_distance(&p2)
}

/// Calculate distance from point to line segment in meters
pub fn haversine_distance_to_line(point: Point, line: Line) -> f64 {
    // Convert line to LineString for ClosestPoint trait
    let line_string = LineString::from(vec![line.start, line.end]);

    match line_string.closest_point(&point) {
        geo::Closest::Intersection(p) | geo::Closest::SinglePoint(p) => {
            haversine_distance(point, p)
        }
        geo::Closest::Indeterminate => f64::INFINITY,
    }
}

/// Great-circle length of a path in meters (0 for an empty path)
pub fn path_length_m(path: &GeoPath) -> f64 {
    path.to_line_string().haversine_length()
}

/// Convert meters to degrees at equator (for bounding box queries)
pub fn meters_to_degrees_approx(meters: f64) -> f64 {
    meters / 111_320.0
}

/// Search radius in degrees that covers `meters` in every direction at
/// `latitude`. Longitude degrees shrink toward the poles, so the radius is
/// widened by the cosine of the latitude.
pub fn search_radius_degrees(meters: f64, latitude: f64) -> f64 {
    let cos_lat = latitude.to_radians().cos().abs().max(0.01);
    meters_to_degrees_approx(meters) / cos_lat
}
