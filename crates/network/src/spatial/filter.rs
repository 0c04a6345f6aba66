//! Viewport filtering.
//!
//! Point facilities are kept when their position lies inside the bounds.
//! Paths are kept whole when any one of their points does, so a pipeline
//! crossing the viewport edge is never clipped.

use geo::Point;

use crate::dataset::PipelineRoute;
use crate::models::entities::{ProductionField, Station, Terminal};
use crate::models::traits::Facility;
use crate::models::types::{Bounds, GeoPath};

/// Anything that can be tested against a bounding box
pub trait InBounds {
    fn intersects_bounds(&self, bounds: &Bounds) -> bool;
}

impl InBounds for Point {
    fn intersects_bounds(&self, bounds: &Bounds) -> bool {
        bounds.contains(*self)
    }
}

impl InBounds for GeoPath {
    fn intersects_bounds(&self, bounds: &Bounds) -> bool {
        self.points().iter().any(|p| bounds.contains(*p))
    }
}

impl InBounds for PipelineRoute {
    fn intersects_bounds(&self, bounds: &Bounds) -> bool {
        self.path.intersects_bounds(bounds)
    }
}

macro_rules! impl_in_bounds_for_facility {
    ($($ty:ty),*) => {
        $(
            impl InBounds for $ty {
                fn intersects_bounds(&self, bounds: &Bounds) -> bool {
                    self.location().is_some_and(|p| bounds.contains(p))
                }
            }
        )*
    };
}

impl_in_bounds_for_facility!(Station, Terminal, ProductionField);

/// Keep the entities that intersect `bounds`, preserving order
pub fn filter_in_bounds<T: InBounds + Clone>(entities: &[T], bounds: &Bounds) -> Vec<T> {
    entities
        .iter()
        .filter(|e| e.intersects_bounds(bounds))
        .cloned()
        .collect()
}
