//! Curve separation for coincident routes.
//!
//! Pipelines between the same two terminals usually share a straight
//! start/end segment and would render as one line. Each straight member of a
//! group gets a distinct offset and is redrawn as a quadratic Bezier bowing
//! away from the nominal route. Offsets are symmetric around zero so the
//! group stays centred on the real route.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataset::PipelineRoute;
use crate::geometry::curve::{
    canonical_normal, control_point, quadratic_bezier, DEFAULT_CURVE_SEGMENTS,
};
use crate::identifiers::PipelineId;
use crate::models::types::GeoPath;
use crate::routes::group_routes;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveOptions {
    /// Offset step between neighbouring members, as a fraction of the chord
    pub base_offset: f64,
    /// Segments each curve is sampled into
    pub segments: usize,
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            base_offset: 0.15,
            segments: DEFAULT_CURVE_SEGMENTS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveOffsetAssignment {
    pub path_id: PipelineId,
    pub offset: f64,
}

/// Offsets `base_offset * (i - (n - 1) / 2)` for the members of one group.
pub fn assign_offsets(members: &[PipelineId], base_offset: f64) -> Vec<CurveOffsetAssignment> {
    let center = (members.len() as f64 - 1.0) / 2.0;

    members
        .iter()
        .enumerate()
        .map(|(i, &path_id)| CurveOffsetAssignment {
            path_id,
            offset: base_offset * (i as f64 - center),
        })
        .collect()
}

/// Rendering paths for `routes` with default curve options.
pub fn separate(routes: &[PipelineRoute]) -> Vec<GeoPath> {
    separate_with(routes, &CurveOptions::default())
}

/// One rendering path per route, in input order. Source routes are not
/// modified.
///
/// Only straight two-point members of a group are curved, and only they take
/// an offset slot; multi-point members keep their real routing.
pub fn separate_with(routes: &[PipelineRoute], options: &CurveOptions) -> Vec<GeoPath> {
    let mut output: Vec<GeoPath> = routes.iter().map(|r| r.path.clone()).collect();

    for (key, members) in group_routes(routes) {
        let straight: Vec<usize> = members
            .into_iter()
            .filter(|&i| routes[i].path.is_straight())
            .collect();

        if straight.len() < 2 {
            continue;
        }

        let ids: Vec<PipelineId> = straight.iter().map(|&i| routes[i].pipeline.id).collect();
        let offsets = assign_offsets(&ids, options.base_offset);

        debug!(
            terminals = ?key.terminals(),
            members = straight.len(),
            "separating coincident routes"
        );

        for (&index, assignment) in straight.iter().zip(&offsets) {
            let route = &routes[index];
            if let Some(curved) = curve_member(route, assignment.offset, options.segments) {
                output[index] = curved;
            }
        }
    }

    output
}

fn curve_member(route: &PipelineRoute, offset: f64, segments: usize) -> Option<GeoPath> {
    if offset == 0.0 {
        return None;
    }

    let path = &route.path;
    let (start, end) = (path.first()?, path.last()?);

    // Oriented by the stored endpoints, not the declared terminals, so every
    // member of the group shares one side convention.
    let normal = canonical_normal(start, end)?;

    let control = control_point(start, end, normal, offset);
    let curve = quadratic_bezier(start, control, end, segments);

    match GeoPath::new(path.owner(), curve) {
        Ok(curved) => Some(curved),
        Err(error) => {
            debug!(pipeline = %path.owner(), %error, "keeping straight route");
            None
        }
    }
}
