//! One fetch cycle's worth of infrastructure, ready for the map.

use serde::{Deserialize, Serialize};

use crate::geometry::simplify::simplify_path;
use crate::identifiers::PipelineId;
use crate::models::entities::{Pipeline, ProductionField, Station, Terminal};
use crate::models::types::{Bounds, GeoPath};
use crate::routes::separation::{separate_with, CurveOptions};
use crate::spatial::filter::filter_in_bounds;
use crate::style::{pipeline_style, StyleAttributes};

/// A pipeline together with the path resolved for it.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineRoute {
    pub pipeline: Pipeline,
    pub path: GeoPath,
}

impl PipelineRoute {
    pub fn new(pipeline: Pipeline, path: GeoPath) -> Self {
        Self { pipeline, path }
    }
}

/// Options for turning resolved routes into presentation paths.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    #[serde(flatten)]
    pub curves: CurveOptions,
    /// Douglas-Peucker tolerance in degrees; 0 keeps every point
    pub simplify_tolerance: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            curves: CurveOptions::default(),
            simplify_tolerance: 0.0001,
        }
    }
}

/// A pipeline path as it should be drawn.
#[derive(Clone, Debug)]
pub struct RenderedRoute<'a> {
    pub pipeline: &'a Pipeline,
    pub path: GeoPath,
    pub style: StyleAttributes,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InfrastructureDataset {
    pub stations: Vec<Station>,
    pub terminals: Vec<Terminal>,
    pub production_fields: Vec<ProductionField>,
    /// Pipelines with a usable path
    pub pipelines: Vec<PipelineRoute>,
    /// Pipelines left off the map for lack of valid coordinates
    pub excluded_pipelines: Vec<PipelineId>,
}

impl InfrastructureDataset {
    /// Entities intersecting `bounds`. Pipelines are kept whole when any
    /// of their points is inside.
    pub fn in_bounds(&self, bounds: &Bounds) -> Self {
        Self {
            stations: filter_in_bounds(&self.stations, bounds),
            terminals: filter_in_bounds(&self.terminals, bounds),
            production_fields: filter_in_bounds(&self.production_fields, bounds),
            pipelines: filter_in_bounds(&self.pipelines, bounds),
            excluded_pipelines: self.excluded_pipelines.clone(),
        }
    }

    /// Separate coincident routes, then simplify, then attach styles.
    pub fn render(&self, options: &RenderOptions) -> Vec<RenderedRoute<'_>> {
        separate_with(&self.pipelines, &options.curves)
            .into_iter()
            .zip(&self.pipelines)
            .map(|(path, route)| RenderedRoute {
                pipeline: &route.pipeline,
                path: simplify_path(&path, options.simplify_tolerance),
                style: pipeline_style(&route.pipeline),
            })
            .collect()
    }

    /// Presentation paths only, in pipeline order.
    pub fn render_paths(&self, options: &RenderOptions) -> Vec<GeoPath> {
        self.render(options).into_iter().map(|r| r.path).collect()
    }

    pub fn facility_count(&self) -> usize {
        self.stations.len() + self.terminals.len() + self.production_fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::{StationId, TerminalId};
    use crate::models::entities::Position;
    use geo::Point;

    fn route(id: u64, from: u64, to: u64, points: &[(f64, f64)]) -> PipelineRoute {
        let mut pipeline =
            Pipeline::new(PipelineId::new(id)).between(TerminalId::new(from), TerminalId::new(to));
        pipeline.product = Some("CRUDE_OIL".into());
        let path = GeoPath::new(
            PipelineId::new(id),
            points.iter().map(|&(lat, lng)| Point::new(lng, lat)).collect(),
        )
        .unwrap();
        PipelineRoute::new(pipeline, path)
    }

    fn dataset() -> InfrastructureDataset {
        InfrastructureDataset {
            stations: vec![Station {
                id: StationId::new(1),
                code: "SP1".into(),
                name: "Pump 1".into(),
                operational_status: None,
                position: Position::at(2.0, 2.0),
            }],
            terminals: vec![],
            production_fields: vec![],
            pipelines: vec![
                route(1, 1, 2, &[(10.0, 10.0), (50.0, 50.0)]),
                route(2, 2, 1, &[(50.0, 50.0), (10.0, 10.0)]),
                route(3, 3, 4, &[(60.0, 60.0), (61.0, 61.0), (61.0, 62.0)]),
            ],
            excluded_pipelines: vec![PipelineId::new(9)],
        }
    }

    #[test]
    fn test_in_bounds() {
        let data = dataset();
        let bounds = Bounds::new(20.0, 0.0, 20.0, 0.0).unwrap();

        let visible = data.in_bounds(&bounds);
        assert_eq!(visible.stations.len(), 1);
        assert_eq!(visible.pipelines.len(), 2);
        assert_eq!(visible.pipelines[0].path.len(), 2);
        assert_eq!(visible.excluded_pipelines, vec![PipelineId::new(9)]);

        let empty = data.in_bounds(&Bounds::new(5.0, 0.0, 5.0, 0.0).unwrap());
        assert!(empty.pipelines.is_empty());
        assert_eq!(empty.stations.len(), 1);
    }

    #[test]
    fn test_render_curves_and_styles() {
        let data = dataset();
        let rendered = data.render(&RenderOptions::default());

        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].path.len() > 2);
        assert!(rendered[1].path.len() > 2);
        assert_eq!(rendered[2].path, data.pipelines[2].path);
        assert_eq!(rendered[0].style.color_hex(), "#1a1a1a");
        assert_eq!(rendered[0].pipeline.id, PipelineId::new(1));
    }

    #[test]
    fn test_coarse_tolerance_flattens_curves() {
        let data = dataset();
        let options = RenderOptions {
            simplify_tolerance: 100.0,
            ..RenderOptions::default()
        };

        for path in data.render_paths(&options) {
            assert_eq!(path.len(), 2);
        }
    }
}
