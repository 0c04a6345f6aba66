//! Per-pipeline path assembly.
//!
//! A pipeline's geometry is found, in order of preference, in its child
//! segments, in its own coordinate list, or in its legacy location list.

use std::cmp::Ordering;

use hydromap_network::identifiers::PipelineId;
use hydromap_network::models::entities::{Pipeline, PipelineSegment};
use hydromap_network::models::types::GeoPath;
use hydromap_network::network::DataFetcher;
use tracing::{debug, info, warn};

use crate::config::EndpointConfig;
use crate::pagination::{decode, PageResponse};
use crate::resolver::{ReferenceResolver, SourceKind};

pub struct PathAssembler<'a> {
    fetcher: &'a dyn DataFetcher,
    endpoints: &'a EndpointConfig,
}

fn by_start_point(a: &PipelineSegment, b: &PipelineSegment) -> Ordering {
    match (a.start_point, b.start_point) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl<'a> PathAssembler<'a> {
    pub fn new(fetcher: &'a dyn DataFetcher, endpoints: &'a EndpointConfig) -> Self {
        Self { fetcher, endpoints }
    }

    /// Segments of a pipeline ordered along the line. Fetch failures count
    /// as "no segments".
    pub async fn fetch_segments(&self, pipeline: PipelineId) -> Vec<PipelineSegment> {
        let path = self.endpoints.segments_path(pipeline);

        let body = match self.fetcher.fetch(&path).await {
            Ok(body) => body,
            Err(e) => {
                warn!(%pipeline, error = %e, "Segment lookup failed, using direct coordinates");
                return Vec::new();
            }
        };

        let mut segments = match decode::<PageResponse<PipelineSegment>>(&path, &body) {
            Ok(PageResponse::Page(page)) => page.content,
            Ok(PageResponse::Bare(segments)) => segments,
            Err(e) => {
                warn!(%pipeline, error = %e, "Segment lookup failed, using direct coordinates");
                return Vec::new();
            }
        };

        segments.sort_by(by_start_point);
        segments
    }

    /// Ids to resolve for a pipeline and the collection they point into.
    async fn reference_ids(&self, pipeline: &Pipeline) -> (Vec<u64>, SourceKind) {
        let segment_ids: Vec<u64> = self
            .fetch_segments(pipeline.id)
            .await
            .iter()
            .flat_map(|s| s.coordinate_ids.iter().map(|id| id.get()))
            .collect();

        if !segment_ids.is_empty() {
            debug!(pipeline = %pipeline.id, count = segment_ids.len(), "Using segmented path");
            return (segment_ids, SourceKind::Current);
        }

        if !pipeline.coordinate_ids.is_empty() {
            let ids = pipeline.coordinate_ids.iter().map(|id| id.get()).collect();
            return (ids, SourceKind::Current);
        }

        let ids = pipeline.location_ids.iter().map(|id| id.get()).collect();
        (ids, SourceKind::Legacy)
    }

    /// The validated path of `pipeline`, empty when it cannot be drawn.
    pub async fn assemble(&self, pipeline: &Pipeline) -> GeoPath {
        let (ids, source) = self.reference_ids(pipeline).await;

        if ids.is_empty() {
            info!(pipeline = %pipeline.id, "Excluding pipeline: insufficient coordinates");
            return GeoPath::empty(pipeline.id);
        }

        let points = ReferenceResolver::new(self.fetcher, self.endpoints)
            .resolve(&ids, source)
            .await;

        match GeoPath::from_reference_points(pipeline.id, &points) {
            Ok(path) => path,
            Err(e) => {
                info!(
                    pipeline = %pipeline.id,
                    reason = %e,
                    "Excluding pipeline: invalid coordinates"
                );
                GeoPath::empty(pipeline.id)
            }
        }
    }
}
