//! Core geographic value types and errors.

use geo::{Coord, Intersects, LineString, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::identifiers::*;

// ============================================================================
// Coordinates
// ============================================================================

/// Minimum number of points a drawable path needs.
pub const MIN_PATH_POINTS: usize = 2;

/// True when the pair is finite and inside WGS84 ranges.
pub fn is_valid_coordinate(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && (-90.0..=90.0).contains(&latitude)
        && (-180.0..=180.0).contains(&longitude)
}

/// A coordinate or location record as served by the backend, fetched by id.
///
/// Records from the legacy location collection carry latitude and longitude
/// transposed; correction happens when resolving, never here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePoint {
    pub id: u64,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub sequence: Option<i64>,
}

impl ReferencePoint {
    pub fn new(id: u64, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
            altitude: None,
            sequence: None,
        }
    }

    /// Same record with latitude and longitude exchanged.
    pub fn swapped(self) -> Self {
        Self {
            latitude: self.longitude,
            longitude: self.latitude,
            ..self
        }
    }

    /// Point in `geo` convention (x = longitude, y = latitude).
    pub fn to_point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

// ============================================================================
// Geographic path
// ============================================================================

/// The drawable path of one pipeline.
///
/// Either empty (the pipeline could not be placed on the map) or at least
/// [`MIN_PATH_POINTS`] points, every one of them inside WGS84 ranges. Points
/// use `geo` convention: x is longitude, y is latitude.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoPath {
    owner: PipelineId,
    points: Vec<Point>,
}

impl GeoPath {
    pub fn empty(owner: PipelineId) -> Self {
        Self {
            owner,
            points: Vec::new(),
        }
    }

    /// Build a validated path.
    ///
    /// Returns `Err` when fewer than two points are given or any point lies
    /// outside the valid latitude/longitude ranges.
    pub fn new(owner: PipelineId, points: Vec<Point>) -> Result<Self> {
        if points.len() < MIN_PATH_POINTS {
            return Err(NetworkError::InvalidPath {
                owner,
                reason: format!(
                    "{} point(s), at least {} required",
                    points.len(),
                    MIN_PATH_POINTS
                ),
            });
        }

        if let Some(bad) = points.iter().find(|p| !is_valid_coordinate(p.y(), p.x())) {
            return Err(NetworkError::InvalidPath {
                owner,
                reason: format!("coordinate out of range: lat {}, lng {}", bad.y(), bad.x()),
            });
        }

        Ok(Self { owner, points })
    }

    pub fn from_reference_points(owner: PipelineId, points: &[ReferencePoint]) -> Result<Self> {
        Self::new(owner, points.iter().map(ReferencePoint::to_point).collect())
    }

    pub fn owner(&self) -> PipelineId {
        self.owner
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A bare start/end segment with no intermediate stops.
    pub fn is_straight(&self) -> bool {
        self.points.len() == 2
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn to_line_string(&self) -> LineString {
        LineString::from(
            self.points
                .iter()
                .map(|p| Coord { x: p.x(), y: p.y() })
                .collect::<Vec<_>>(),
        )
    }

    /// `(latitude, longitude)` pairs in path order.
    pub fn lat_lngs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.y(), p.x())).collect()
    }
}

// ============================================================================
// Bounding box
// ============================================================================

/// Inclusive latitude/longitude rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self> {
        let bounds = Self {
            north,
            south,
            east,
            west,
        };

        if [north, south, east, west].iter().any(|v| !v.is_finite()) {
            return Err(NetworkError::InvalidBounds(
                "bounds must contain finite coordinates".into(),
            ));
        }
        if south > north || west > east {
            return Err(NetworkError::InvalidBounds(format!(
                "expected south <= north and west <= east, got {:?}",
                bounds
            )));
        }

        Ok(bounds)
    }

    /// The box as a `geo` rectangle (x = longitude, y = latitude).
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            Coord {
                x: self.west,
                y: self.south,
            },
            Coord {
                x: self.east,
                y: self.north,
            },
        )
    }

    /// Edges count as inside.
    pub fn contains(&self, point: Point) -> bool {
        self.to_rect().intersects(&point)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Failure reported by a [`DataFetcher`](crate::network::DataFetcher).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("Request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("Request to {path} timed out")]
    Timeout { path: String },

    #[error("Request to {path} returned status {status}")]
    Status { path: String, status: u16 },

    #[error("Invalid request URL {path}: {message}")]
    InvalidUrl { path: String, message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Pipeline {owner} has no usable path: {reason}")]
    InvalidPath { owner: PipelineId, reason: String },

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_requires_two_points() {
        let owner = PipelineId::new(1);
        assert!(GeoPath::new(owner, vec![]).is_err());
        assert!(GeoPath::new(owner, vec![Point::new(3.0, 36.0)]).is_err());

        let path = GeoPath::new(owner, vec![Point::new(3.0, 36.0), Point::new(5.0, 32.0)]).unwrap();
        assert_eq!(path.len(), 2);
        assert!(path.is_straight());
    }

    #[test]
    fn test_path_rejects_out_of_range_points() {
        let owner = PipelineId::new(1);
        let bad_lat = vec![Point::new(3.0, 36.0), Point::new(5.0, 91.0)];
        let bad_lng = vec![Point::new(-181.0, 36.0), Point::new(5.0, 30.0)];
        let nan = vec![Point::new(f64::NAN, 36.0), Point::new(5.0, 30.0)];

        assert!(GeoPath::new(owner, bad_lat).is_err());
        assert!(GeoPath::new(owner, bad_lng).is_err());
        assert!(GeoPath::new(owner, nan).is_err());
    }

    #[test]
    fn test_reference_point_axis_convention() {
        let point = ReferencePoint::new(7, 36.75, 3.05);
        let p = point.to_point();
        assert_eq!(p.x(), 3.05);
        assert_eq!(p.y(), 36.75);

        let swapped = point.swapped();
        assert_eq!(swapped.latitude, 3.05);
        assert_eq!(swapped.longitude, 36.75);
        assert_eq!(swapped.id, 7);
    }

    #[test]
    fn test_reference_point_accepts_short_field_names() {
        let point: ReferencePoint =
            serde_json::from_str(r#"{"id": 3, "lat": 31.5, "lng": 5.2, "sequence": 4}"#).unwrap();
        assert_eq!(point.latitude, 31.5);
        assert_eq!(point.longitude, 5.2);
        assert_eq!(point.sequence, Some(4));
        assert_eq!(point.altitude, None);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = Bounds::new(20.0, 0.0, 20.0, 0.0).unwrap();
        assert!(bounds.contains(Point::new(20.0, 20.0)));
        assert!(bounds.contains(Point::new(0.0, 0.0)));
        assert!(!bounds.contains(Point::new(20.1, 10.0)));
    }

    #[test]
    fn test_bounds_edges_and_rect() {
        let bounds = Bounds::new(36.9, 31.5, 6.2, -0.4).unwrap();
        let rect = bounds.to_rect();
        assert_eq!(rect.min(), Coord { x: -0.4, y: 31.5 });
        assert_eq!(rect.max(), Coord { x: 6.2, y: 36.9 });

        // Points on each edge, then just outside each edge
        assert!(bounds.contains(Point::new(-0.4, 33.0)));
        assert!(bounds.contains(Point::new(6.2, 33.0)));
        assert!(bounds.contains(Point::new(3.0, 31.5)));
        assert!(bounds.contains(Point::new(3.0, 36.9)));
        assert!(!bounds.contains(Point::new(-0.5, 33.0)));
        assert!(!bounds.contains(Point::new(6.3, 33.0)));
        assert!(!bounds.contains(Point::new(3.0, 31.4)));
        assert!(!bounds.contains(Point::new(3.0, 37.0)));

        let line = Bounds::new(10.0, 10.0, 5.0, 0.0).unwrap();
        assert!(line.contains(Point::new(2.5, 10.0)));
        assert!(!line.contains(Point::new(2.5, 10.1)));
    }

    #[test]
    fn test_bounds_validation() {
        assert!(Bounds::new(0.0, 10.0, 5.0, 0.0).is_err());
        assert!(Bounds::new(10.0, 0.0, 0.0, 5.0).is_err());
        assert!(Bounds::new(f64::NAN, 0.0, 5.0, 0.0).is_err());
    }
}
