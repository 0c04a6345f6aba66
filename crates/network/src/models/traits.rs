//! Core traits for network entities.
//!
//! These traits define the read interface the presentation layer works
//! against. The in-memory provider is the only implementation today.

use geo::Point;
use std::sync::Arc;

use crate::dataset::PipelineRoute;
use crate::identifiers::*;
use crate::models::entities::{ProductionField, Station, Terminal};
use crate::routes::RouteGroupKey;

// ============================================================================
// Core Entity Traits
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum FacilityKind {
    Station,
    Terminal,
    ProductionField,
}

/// A point facility (station, terminal or production field)
pub trait Facility: Send + Sync {
    fn kind(&self) -> FacilityKind;

    /// Backend id, unique within one facility kind
    fn raw_id(&self) -> u64;

    fn code(&self) -> &str;
    fn name(&self) -> &str;
    fn operational_status(&self) -> Option<&str>;

    /// Map position, `None` when missing or out of range
    fn location(&self) -> Option<Point>;
}

macro_rules! impl_facility {
    ($ty:ty, $kind:expr) => {
        impl Facility for $ty {
            fn kind(&self) -> FacilityKind {
                $kind
            }

            fn raw_id(&self) -> u64 {
                self.id.get()
            }

            fn code(&self) -> &str {
                &self.code
            }

            fn name(&self) -> &str {
                &self.name
            }

            fn operational_status(&self) -> Option<&str> {
                self.operational_status.as_deref()
            }

            fn location(&self) -> Option<Point> {
                self.position.point()
            }
        }
    };
}

impl_facility!(Station, FacilityKind::Station);
impl_facility!(Terminal, FacilityKind::Terminal);
impl_facility!(ProductionField, FacilityKind::ProductionField);

// ============================================================================
// Provider Trait
// ============================================================================

/// Read access to one fetched network with lookup and query methods
pub trait NetworkProvider: Send + Sync {
    // ---- Lookups ----
    fn get_station(&self, id: StationId) -> Option<Arc<Station>>;
    fn get_terminal(&self, id: TerminalId) -> Option<Arc<Terminal>>;
    fn get_production_field(&self, id: ProductionFieldId) -> Option<Arc<ProductionField>>;
    fn get_pipeline(&self, id: PipelineId) -> Option<Arc<PipelineRoute>>;

    // ---- Collections ----
    fn all_facilities(&self) -> Vec<Arc<dyn Facility>>;
    fn all_pipelines(&self) -> Vec<Arc<PipelineRoute>>;

    /// Pipelines connecting the same pair of terminals, in either direction
    fn pipelines_between(&self, key: RouteGroupKey) -> Vec<Arc<PipelineRoute>>;

    // ---- Spatial queries ----

    /// Find facilities within radius (meters)
    fn facilities_near(&self, point: Point, radius_m: f64) -> Vec<Arc<dyn Facility>>;

    /// Find pipelines passing within radius (meters)
    fn pipelines_near(&self, point: Point, radius_m: f64) -> Vec<Arc<PipelineRoute>>;

    /// Find the N nearest facilities to a point
    fn nearest_facilities(&self, point: Point, n: usize) -> Vec<Arc<dyn Facility>>;
}
