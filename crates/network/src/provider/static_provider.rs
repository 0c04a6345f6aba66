//! In-memory network provider built from one fetched dataset.
//!
//! Stores every entity behind an `Arc` with lookup maps and R-tree indices
//! for proximity queries.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use geo::Point;
use rstar::RTree;

use crate::dataset::{InfrastructureDataset, PipelineRoute};
use crate::identifiers::*;
use crate::models::entities::{ProductionField, Station, Terminal};
use crate::models::traits::*;
use crate::routes::RouteGroupKey;
use crate::spatial::index::{FacilityNode, PipelineSegmentNode};
use crate::spatial::queries::{
    haversine_distance, haversine_distance_to_line, search_radius_degrees,
};

/// In-memory network provider with spatial indexing
///
/// This type is cheap to clone since all data is stored in `Arc`s.
#[derive(Clone)]
pub struct StaticNetworkProvider {
    // Core data
    facilities: Vec<Arc<dyn Facility>>,
    pipelines: Vec<Arc<PipelineRoute>>,

    // Lookup maps
    station_map: HashMap<StationId, Arc<Station>>,
    terminal_map: HashMap<TerminalId, Arc<Terminal>>,
    field_map: HashMap<ProductionFieldId, Arc<ProductionField>>,
    pipeline_map: HashMap<PipelineId, Arc<PipelineRoute>>,
    route_groups: HashMap<RouteGroupKey, Vec<Arc<PipelineRoute>>>,

    // Spatial indices
    facility_tree: RTree<FacilityNode>,
    pipeline_tree: RTree<PipelineSegmentNode>,
}

impl StaticNetworkProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self::from_dataset(InfrastructureDataset::default())
    }

    pub fn from_dataset(dataset: InfrastructureDataset) -> Self {
        let stations: Vec<Arc<Station>> = dataset.stations.into_iter().map(Arc::new).collect();
        let terminals: Vec<Arc<Terminal>> = dataset.terminals.into_iter().map(Arc::new).collect();
        let fields: Vec<Arc<ProductionField>> =
            dataset.production_fields.into_iter().map(Arc::new).collect();
        let pipelines: Vec<Arc<PipelineRoute>> =
            dataset.pipelines.into_iter().map(Arc::new).collect();

        // Build lookup maps
        let station_map: HashMap<_, _> = stations.iter().map(|s| (s.id, s.clone())).collect();
        let terminal_map: HashMap<_, _> = terminals.iter().map(|t| (t.id, t.clone())).collect();
        let field_map: HashMap<_, _> = fields.iter().map(|f| (f.id, f.clone())).collect();
        let pipeline_map: HashMap<_, _> = pipelines
            .iter()
            .map(|r| (r.pipeline.id, r.clone()))
            .collect();

        let mut route_groups: HashMap<RouteGroupKey, Vec<Arc<PipelineRoute>>> = HashMap::new();
        for route in &pipelines {
            if let Some(key) = RouteGroupKey::for_pipeline(&route.pipeline) {
                route_groups.entry(key).or_default().push(route.clone());
            }
        }

        let facilities: Vec<Arc<dyn Facility>> = stations
            .iter()
            .map(|s| s.clone() as Arc<dyn Facility>)
            .chain(terminals.iter().map(|t| t.clone() as Arc<dyn Facility>))
            .chain(fields.iter().map(|f| f.clone() as Arc<dyn Facility>))
            .collect();

        // Build spatial indices; facilities without a position are not indexed
        let facility_tree = RTree::bulk_load(
            facilities
                .iter()
                .filter_map(|f| f.location().map(|p| FacilityNode::new(p, f.clone())))
                .collect(),
        );

        let mut segments = Vec::new();
        for route in &pipelines {
            for segment in route.path.to_line_string().lines() {
                segments.push(PipelineSegmentNode::new(segment, route.clone()));
            }
        }
        let pipeline_tree = RTree::bulk_load(segments);

        Self {
            facilities,
            pipelines,
            station_map,
            terminal_map,
            field_map,
            pipeline_map,
            route_groups,
            facility_tree,
            pipeline_tree,
        }
    }
}

impl Default for StaticNetworkProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn valid_radius(radius_m: f64) -> bool {
    radius_m > 0.0 && radius_m.is_finite()
}

impl NetworkProvider for StaticNetworkProvider {
    fn get_station(&self, id: StationId) -> Option<Arc<Station>> {
        self.station_map.get(&id).cloned()
    }

    fn get_terminal(&self, id: TerminalId) -> Option<Arc<Terminal>> {
        self.terminal_map.get(&id).cloned()
    }

    fn get_production_field(&self, id: ProductionFieldId) -> Option<Arc<ProductionField>> {
        self.field_map.get(&id).cloned()
    }

    fn get_pipeline(&self, id: PipelineId) -> Option<Arc<PipelineRoute>> {
        self.pipeline_map.get(&id).cloned()
    }

    fn all_facilities(&self) -> Vec<Arc<dyn Facility>> {
        self.facilities.clone()
    }

    fn all_pipelines(&self) -> Vec<Arc<PipelineRoute>> {
        self.pipelines.clone()
    }

    fn pipelines_between(&self, key: RouteGroupKey) -> Vec<Arc<PipelineRoute>> {
        self.route_groups.get(&key).cloned().unwrap_or_default()
    }

    fn facilities_near(&self, point: Point, radius_m: f64) -> Vec<Arc<dyn Facility>> {
        if !valid_radius(radius_m) {
            return Vec::new();
        }

        let radius_deg = search_radius_degrees(radius_m, point.y());
        self.facility_tree
            .locate_within_distance([point.x(), point.y()], radius_deg * radius_deg)
            .filter(|node| haversine_distance(point, node.location) <= radius_m)
            .map(|node| node.facility.clone())
            .collect()
    }

    fn pipelines_near(&self, point: Point, radius_m: f64) -> Vec<Arc<PipelineRoute>> {
        if !valid_radius(radius_m) {
            return Vec::new();
        }

        let radius_deg = search_radius_degrees(radius_m, point.y());
        let mut seen = HashSet::new();
        self.pipeline_tree
            .locate_within_distance([point.x(), point.y()], radius_deg * radius_deg)
            .filter(|node| haversine_distance_to_line(point, node.segment) <= radius_m)
            .filter(|node| seen.insert(node.route.pipeline.id))
            .map(|node| node.route.clone())
            .collect()
    }

    fn nearest_facilities(&self, point: Point, n: usize) -> Vec<Arc<dyn Facility>> {
        self.facility_tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(n)
            .map(|node| node.facility.clone())
            .collect()
    }
}
