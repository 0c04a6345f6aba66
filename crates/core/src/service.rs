//! One fetch cycle: list every entity, assemble every pipeline path.

use std::sync::Arc;

use futures_util::future::{join_all, AbortRegistration, Abortable};
use hydromap_network::dataset::{InfrastructureDataset, PipelineRoute};
use hydromap_network::models::entities::{Pipeline, ProductionField, Station, Terminal};
use hydromap_network::models::types::Bounds;
use hydromap_network::network::DataFetcher;
use tracing::{debug, info};

use crate::assembler::PathAssembler;
use crate::config::CoreConfig;
use crate::error::{CoreError, Result};
use crate::http::HttpFetcher;
use crate::pagination::fetch_all;

#[derive(Clone)]
pub struct InfrastructureService {
    fetcher: Arc<dyn DataFetcher>,
    config: CoreConfig,
}

impl InfrastructureService {
    pub fn new(fetcher: Arc<dyn DataFetcher>, config: CoreConfig) -> Self {
        Self { fetcher, config }
    }

    /// Service talking HTTP to `config.base_url`.
    pub fn from_config(config: CoreConfig) -> Result<Self> {
        let fetcher = HttpFetcher::from_config(&config)?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Fetch all four collections and resolve every pipeline's path.
    ///
    /// Fails if any list page fails. Pipelines whose path cannot be drawn
    /// are reported in `excluded_pipelines` instead.
    pub async fn get_all_infrastructure(&self) -> Result<InfrastructureDataset> {
        let fetcher = self.fetcher.as_ref();
        let endpoints = &self.config.endpoints;
        let page_size = self.config.page_size;

        let (stations, terminals, production_fields, pipelines) = tokio::try_join!(
            fetch_all::<Station>(fetcher, &endpoints.stations, page_size),
            fetch_all::<Terminal>(fetcher, &endpoints.terminals, page_size),
            fetch_all::<ProductionField>(fetcher, &endpoints.production_fields, page_size),
            fetch_all::<Pipeline>(fetcher, &endpoints.pipelines, page_size),
        )?;
        debug!(
            stations = stations.len(),
            terminals = terminals.len(),
            production_fields = production_fields.len(),
            pipelines = pipelines.len(),
            "Fetched entity lists"
        );

        let assembler = PathAssembler::new(fetcher, endpoints);
        let paths = join_all(pipelines.iter().map(|p| assembler.assemble(p))).await;

        let mut routes = Vec::with_capacity(pipelines.len());
        let mut excluded = Vec::new();
        for (pipeline, path) in pipelines.into_iter().zip(paths) {
            if path.is_empty() {
                excluded.push(pipeline.id);
            } else {
                routes.push(PipelineRoute::new(pipeline, path));
            }
        }

        info!(
            facilities = stations.len() + terminals.len() + production_fields.len(),
            pipelines = routes.len(),
            excluded = excluded.len(),
            "Infrastructure loaded"
        );

        Ok(InfrastructureDataset {
            stations,
            terminals,
            production_fields,
            pipelines: routes,
            excluded_pipelines: excluded,
        })
    }

    /// Like [`get_all_infrastructure`](Self::get_all_infrastructure), keeping
    /// only entities intersecting `bounds`.
    pub async fn get_infrastructure_in_bounds(
        &self,
        bounds: &Bounds,
    ) -> Result<InfrastructureDataset> {
        Ok(self.get_all_infrastructure().await?.in_bounds(bounds))
    }

    /// Like [`get_all_infrastructure`](Self::get_all_infrastructure), but
    /// stops and drops every in-flight request once the matching
    /// `AbortHandle` is aborted.
    pub async fn get_all_infrastructure_cancellable(
        &self,
        registration: AbortRegistration,
    ) -> Result<InfrastructureDataset> {
        match Abortable::new(self.get_all_infrastructure(), registration).await {
            Ok(result) => result,
            Err(_) => {
                info!("Infrastructure fetch cancelled");
                Err(CoreError::Cancelled)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeFetcher, PendingFetcher};
    use futures_util::future::AbortHandle;
    use hydromap_network::identifiers::PipelineId;
    use hydromap_network::models::types::FetchError;
    use serde_json::json;
    use std::time::Duration;

    fn page(content: serde_json::Value) -> serde_json::Value {
        json!({"content": content, "totalPages": 1, "last": true, "number": 0})
    }

    fn backend() -> FakeFetcher {
        FakeFetcher::new()
            .with_json(
                "stations?page=0&size=100",
                page(json!([{"id": 1, "code": "SP1", "latitude": 31.68, "longitude": 6.07}])),
            )
            .with_json(
                "terminals?page=0&size=100",
                json!([
                    {"id": 10, "code": "T-HMD", "latitude": 31.70, "longitude": 6.10},
                    {"id": 20, "code": "T-ARZ", "location": {"latitude": 35.85, "longitude": -0.31}}
                ]),
            )
            .with_json(
                "production-fields?page=0&size=100",
                page(json!([{"id": 5, "code": "HMD", "latitude": 31.67, "longitude": 6.05}])),
            )
            .with_json(
                "pipelines?page=0&size=100",
                page(json!([
                    {"id": 100, "code": "OZ1", "product": "CRUDE_OIL", "departureTerminalId": 10,
                     "arrivalTerminalId": 20, "coordinateIds": [1, 2]},
                    {"id": 101, "code": "GZ1", "product": "NATURAL_GAS", "departureTerminalId": 20,
                     "arrivalTerminalId": 10, "locationIds": [3, 4]},
                    {"id": 102, "code": "OZ2", "coordinateIds": [9]}
                ])),
            )
            .with_json("pipeline-segments/pipeline/100", json!([]))
            .with_json("pipeline-segments/pipeline/101", json!([]))
            .with_json("pipeline-segments/pipeline/102", json!([]))
            .with_json("coordinates/1", json!({"id": 1, "latitude": 31.70, "longitude": 6.10}))
            .with_json("coordinates/2", json!({"id": 2, "latitude": 35.85, "longitude": -0.31}))
            .with_json("locations/3", json!({"id": 3, "latitude": -0.31, "longitude": 35.85}))
            .with_json("locations/4", json!({"id": 4, "latitude": 6.10, "longitude": 31.70}))
            .with_json("coordinates/9", json!({"id": 9, "latitude": 31.0, "longitude": 6.0}))
    }

    fn service(fetcher: impl DataFetcher + 'static) -> InfrastructureService {
        InfrastructureService::new(Arc::new(fetcher), CoreConfig::default())
    }

    #[tokio::test]
    async fn test_get_all_infrastructure() {
        let data = service(backend()).get_all_infrastructure().await.unwrap();

        assert_eq!(data.stations.len(), 1);
        assert_eq!(data.terminals.len(), 2);
        assert_eq!(data.production_fields.len(), 1);
        assert_eq!(data.pipelines.len(), 2);
        assert_eq!(data.excluded_pipelines, vec![PipelineId::new(102)]);

        let legacy = &data.pipelines[1];
        assert_eq!(legacy.path.lat_lngs(), vec![(35.85, -0.31), (31.70, 6.10)]);
    }

    #[tokio::test]
    async fn test_renders_reciprocal_pipelines_apart() {
        let data = service(backend()).get_all_infrastructure().await.unwrap();
        let paths = data.render_paths(&CoreConfig::default().render);

        assert_eq!(paths.len(), 2);
        assert!(paths[0].len() > 2);
        assert!(paths[1].len() > 2);
        assert_ne!(paths[0].points(), paths[1].points());
    }

    #[tokio::test]
    async fn test_list_failure_fails_whole_fetch() {
        let fetcher = backend().with_status("terminals?page=0&size=100", 503);

        let result = service(fetcher).get_all_infrastructure().await;

        assert!(matches!(
            result,
            Err(CoreError::Fetch(FetchError::Status { status: 503, .. }))
        ));
    }

    #[tokio::test]
    async fn test_in_bounds() {
        let bounds = Bounds::new(33.0, 30.0, 7.0, 5.0).unwrap();
        let data = service(backend())
            .get_infrastructure_in_bounds(&bounds)
            .await
            .unwrap();

        assert_eq!(data.stations.len(), 1);
        assert_eq!(data.terminals.len(), 1);
        assert_eq!(data.terminals[0].code, "T-HMD");
        assert_eq!(data.pipelines.len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_before_start() {
        let (handle, registration) = AbortHandle::new_pair();
        handle.abort();

        let result = service(backend())
            .get_all_infrastructure_cancellable(registration)
            .await;

        assert!(matches!(result, Err(CoreError::Cancelled)));
    }

    #[tokio::test]
    async fn test_cancel_in_flight() {
        let (handle, registration) = AbortHandle::new_pair();
        let service = service(PendingFetcher);

        let (result, ()) = tokio::join!(
            service.get_all_infrastructure_cancellable(registration),
            async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                handle.abort();
            }
        );

        assert!(matches!(result, Err(CoreError::Cancelled)));
    }
}
