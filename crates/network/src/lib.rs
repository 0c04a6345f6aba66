//! # hydromap-network
//!
//! Geospatial model of a hydrocarbon pipeline network, independent of how
//! the data is fetched.
//!
//! ## Features
//!
//! - **Validated paths**: `GeoPath` is either empty or a drawable polyline
//! - **Route separation**: coincident pipelines between the same terminals
//!   are redrawn as distinct Bezier curves
//! - **Simplification**: Douglas-Peucker point reduction for rendering
//! - **Spatial queries**: bounds filtering, haversine distances and an R-tree
//!   backed provider
//! - **Styling**: status and product codes mapped to map styles with fuzzy
//!   fallback rules
//! - **Pluggable networking**: implement [`DataFetcher`] to feed the
//!   aggregation layer
//!
//! ## Example
//!
//! ```
//! use hydromap_network::prelude::*;
//! use geo::Point;
//!
//! let pipeline = Pipeline::new(PipelineId::new(1))
//!     .between(TerminalId::new(10), TerminalId::new(20));
//! let path = GeoPath::new(
//!     pipeline.id,
//!     vec![Point::new(6.10, 31.70), Point::new(-0.31, 35.85)],
//! )
//! .unwrap();
//!
//! let dataset = InfrastructureDataset {
//!     pipelines: vec![PipelineRoute::new(pipeline, path)],
//!     ..Default::default()
//! };
//!
//! let provider = StaticNetworkProvider::from_dataset(dataset);
//! let nearby = provider.pipelines_near(Point::new(6.10, 31.70), 5000.0);
//! assert_eq!(nearby.len(), 1);
//! ```

pub mod dataset;
pub mod geometry;
pub mod identifiers;
pub mod models;
pub mod network;
pub mod provider;
pub mod routes;
pub mod spatial;
pub mod style;

// Re-exports for convenience
pub mod prelude {
    pub use crate::dataset::{InfrastructureDataset, PipelineRoute, RenderOptions, RenderedRoute};
    pub use crate::geometry::{simplify, simplify_path};
    pub use crate::identifiers::*;
    pub use crate::models::{entities::*, traits::*, types::*};
    pub use crate::network::traits::*;
    pub use crate::provider::StaticNetworkProvider;
    pub use crate::routes::{separate, separate_with, CurveOptions, RouteGroupKey};
    pub use crate::spatial::{filter_in_bounds, haversine_distance, InBounds};
    pub use crate::style::{classify_product, classify_status, pipeline_style, StyleAttributes};
}

pub use prelude::*;
