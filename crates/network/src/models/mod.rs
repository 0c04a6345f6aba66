//! Network data models, types, and traits.

pub mod entities;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use entities::{
    EmbeddedLocation, InfrastructureEntity, Pipeline, PipelineSegment, Position, ProductionField,
    Station, Terminal,
};
pub use traits::{Facility, FacilityKind, NetworkProvider};
pub use types::{
    is_valid_coordinate, Bounds, FetchError, GeoPath, NetworkError, ReferencePoint, Result,
    MIN_PATH_POINTS,
};
