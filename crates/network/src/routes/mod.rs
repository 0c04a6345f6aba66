//! Route groups: pipelines that share the same pair of end terminals.

pub mod separation;

use std::collections::BTreeMap;

use crate::dataset::PipelineRoute;
use crate::identifiers::TerminalId;
use crate::models::entities::Pipeline;

pub use separation::{assign_offsets, separate, separate_with, CurveOffsetAssignment, CurveOptions};

/// Unordered terminal pair. `(A, B)` and `(B, A)` produce the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteGroupKey {
    low: TerminalId,
    high: TerminalId,
}

impl RouteGroupKey {
    pub fn new(a: TerminalId, b: TerminalId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Key for a pipeline, `None` unless both terminals are known.
    pub fn for_pipeline(pipeline: &Pipeline) -> Option<Self> {
        pipeline
            .terminals()
            .map(|(departure, arrival)| Self::new(departure, arrival))
    }

    /// Terminals in canonical (ascending) order.
    pub fn terminals(&self) -> (TerminalId, TerminalId) {
        (self.low, self.high)
    }
}

/// Indices of `routes` grouped by terminal pair, each group in input order.
/// Routes without both terminals are left out.
pub fn group_routes(routes: &[PipelineRoute]) -> BTreeMap<RouteGroupKey, Vec<usize>> {
    let mut groups: BTreeMap<RouteGroupKey, Vec<usize>> = BTreeMap::new();

    for (index, route) in routes.iter().enumerate() {
        if let Some(key) = RouteGroupKey::for_pipeline(&route.pipeline) {
            groups.entry(key).or_default().push(index);
        }
    }

    groups
}
