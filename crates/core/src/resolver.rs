//! Reference point resolution.
//!
//! Paths are stored as lists of ids into one of two point collections. The
//! legacy location collection has latitude and longitude transposed, so each
//! source carries its own correction alongside its endpoint.

use futures_util::future::join_all;
use hydromap_network::models::types::ReferencePoint;
use hydromap_network::network::DataFetcher;
use tracing::warn;

use crate::config::EndpointConfig;
use crate::pagination::decode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SourceKind {
    /// The coordinate collection, stored as served
    Current,
    /// The location collection, stored with axes swapped
    Legacy,
}

impl SourceKind {
    pub fn path(self, endpoints: &EndpointConfig, id: u64) -> String {
        match self {
            SourceKind::Current => endpoints.coordinate_path(id),
            SourceKind::Legacy => endpoints.location_path(id),
        }
    }

    /// Bring a raw record into true latitude/longitude order.
    pub fn correct(self, point: ReferencePoint) -> ReferencePoint {
        match self {
            SourceKind::Current => point,
            SourceKind::Legacy => point.swapped(),
        }
    }
}

pub struct ReferenceResolver<'a> {
    fetcher: &'a dyn DataFetcher,
    endpoints: &'a EndpointConfig,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(fetcher: &'a dyn DataFetcher, endpoints: &'a EndpointConfig) -> Self {
        Self { fetcher, endpoints }
    }

    /// Fetch and correct every id concurrently.
    ///
    /// Ids that fail to fetch or decode are dropped with a warning. The
    /// result is ordered by `sequence`; unsequenced points follow in fetch
    /// order.
    pub async fn resolve(&self, ids: &[u64], source: SourceKind) -> Vec<ReferencePoint> {
        let fetches = ids.iter().map(|&id| self.resolve_one(id, source));
        let mut points: Vec<ReferencePoint> =
            join_all(fetches).await.into_iter().flatten().collect();

        points.sort_by_key(|p| (p.sequence.is_none(), p.sequence));
        points
    }

    async fn resolve_one(&self, id: u64, source: SourceKind) -> Option<ReferencePoint> {
        let path = source.path(self.endpoints, id);
        let kind: &'static str = source.into();

        let body = match self.fetcher.fetch(&path).await {
            Ok(body) => body,
            Err(e) => {
                warn!(id, source = kind, error = %e, "Dropping unresolved reference point");
                return None;
            }
        };

        match decode::<ReferencePoint>(&path, &body) {
            Ok(point) => Some(source.correct(point)),
            Err(e) => {
                warn!(id, source = kind, error = %e, "Dropping undecodable reference point");
                None
            }
        }
    }
}
