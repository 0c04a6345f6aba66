//! R-tree nodes for spatial indexing.
//!
//! Wraps network entities with geometric data for efficient spatial queries.
//!
//! ## Two-Stage Filtering
//!
//! The spatial queries use a two-stage filtering approach:
//! 1. **R-tree filter**: Uses Euclidean distance in degrees for fast
//!    approximate filtering, with a search radius widened for latitude
//! 2. **Haversine filter**: Applies accurate geodesic distance on filtered results

use std::sync::Arc;
use geo::{Point, Line};
use rstar::{RTreeObject, AABB, PointDistance};

use crate::dataset::PipelineRoute;
use crate::models::traits::Facility;

// ============================================================================
// Facility Spatial Node
// ============================================================================

#[derive(Clone)]
pub struct FacilityNode {
    pub facility: Arc<dyn Facility>,
    pub location: Point,
}

impl FacilityNode {
    pub fn new(location: Point, facility: Arc<dyn Facility>) -> Self {
        Self { facility, location }
    }
}

impl RTreeObject for FacilityNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.location.x(), self.location.y()])
    }
}

impl PointDistance for FacilityNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.location.x() - point[0];
        let dy = self.location.y() - point[1];
        dx * dx + dy * dy
    }
}

// ============================================================================
// Pipeline Segment Spatial Node
// ============================================================================

#[derive(Clone)]
pub struct PipelineSegmentNode {
    pub route: Arc<PipelineRoute>,
    pub segment: Line,
    aabb: AABB<[f64; 2]>,
}

impl PipelineSegmentNode {
    pub fn new(segment: Line, route: Arc<PipelineRoute>) -> Self {
        let start = [segment.start.x, segment.start.y];
        let end = [segment.end.x, segment.end.y];

        let aabb = AABB::from_corners(start, end);

        Self {
            route,
            segment,
            aabb,
        }
    }
}

impl RTreeObject for PipelineSegmentNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

impl PointDistance for PipelineSegmentNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        // Squared Euclidean distance from point to the segment
        let a = [self.segment.start.x, self.segment.start.y];
        let b = [self.segment.end.x, self.segment.end.y];

        let ab = [b[0] - a[0], b[1] - a[1]];
        let ap = [point[0] - a[0], point[1] - a[1]];

        let ab_ab = ab[0] * ab[0] + ab[1] * ab[1];

        if ab_ab == 0.0 {
            // Degenerate segment
            return ap[0] * ap[0] + ap[1] * ap[1];
        }

        let t = ((ab[0] * ap[0] + ab[1] * ap[1]) / ab_ab).clamp(0.0, 1.0);

        let dx = point[0] - (a[0] + t * ab[0]);
        let dy = point[1] - (a[1] + t * ab[1]);

        dx * dx + dy * dy
    }
}
