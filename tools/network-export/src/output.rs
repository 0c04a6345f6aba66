use anyhow::{Context, Result};
use geo::{BoundingRect, Coord, MultiPoint, Point};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use hydromap_network::dataset::{InfrastructureDataset, RenderedRoute};
use hydromap_network::models::traits::Facility;
use hydromap_network::spatial::path_length_m;
use hydromap_network::style::{classify_status, StyleAttributes};
use serde_json::{json, Map};
use std::path::Path;

fn style_properties(properties: &mut Map<String, serde_json::Value>, style: &StyleAttributes) {
    properties.insert("stroke".to_string(), json!(style.color_hex()));
    properties.insert("stroke-width".to_string(), json!(style.weight));
    properties.insert("stroke-opacity".to_string(), json!(style.opacity));
    if let Some(dash) = style.dash_pattern {
        properties.insert("stroke-dasharray".to_string(), json!(dash));
    }
}

/// Point feature for a facility, `None` when it has no usable position
pub fn facility_feature(facility: &dyn Facility) -> Option<Feature> {
    let location = facility.location()?;
    let kind: &'static str = facility.kind().into();
    let status = facility.operational_status();

    let mut properties = Map::new();
    properties.insert("feature_type".to_string(), json!(kind));
    properties.insert("id".to_string(), json!(facility.raw_id()));
    properties.insert("code".to_string(), json!(facility.code()));
    properties.insert("name".to_string(), json!(facility.name()));
    properties.insert("operational_status".to_string(), json!(status));
    properties.insert(
        "marker-color".to_string(),
        json!(status.map(classify_status).unwrap_or_default().color_hex()),
    );

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![location.x(), location.y()]))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

/// LineString feature for a rendered pipeline path
pub fn route_feature(route: &RenderedRoute<'_>) -> Feature {
    let pipeline = route.pipeline;
    let coordinates: Vec<Vec<f64>> = route
        .path
        .points()
        .iter()
        .map(|p| vec![p.x(), p.y()])
        .collect();

    let mut properties = Map::new();
    properties.insert("feature_type".to_string(), json!("pipeline"));
    properties.insert("id".to_string(), json!(pipeline.id.get()));
    properties.insert("code".to_string(), json!(pipeline.code));
    properties.insert("name".to_string(), json!(pipeline.name));
    properties.insert("product".to_string(), json!(pipeline.product));
    properties.insert(
        "operational_status".to_string(),
        json!(pipeline.operational_status),
    );
    properties.insert(
        "length_km".to_string(),
        json!(path_length_m(&route.path) / 1000.0),
    );
    style_properties(&mut properties, &route.style);

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(coordinates))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// `[west, south, east, north]` over every exported coordinate
fn collection_bbox(
    dataset: &InfrastructureDataset,
    routes: &[RenderedRoute<'_>],
) -> Option<Vec<f64>> {
    let facility_points = dataset
        .stations
        .iter()
        .map(|s| s as &dyn Facility)
        .chain(dataset.terminals.iter().map(|t| t as &dyn Facility))
        .chain(dataset.production_fields.iter().map(|f| f as &dyn Facility))
        .filter_map(|f| f.location());
    let route_points = routes.iter().flat_map(|r| r.path.points().iter().copied());

    let points: MultiPoint = facility_points.chain(route_points).collect::<Vec<Point>>().into();
    let rect = points.bounding_rect()?;
    let (min, max): (Coord, Coord) = (rect.min(), rect.max());

    Some(vec![min.x, min.y, max.x, max.y])
}

/// Facilities first, then pipelines in render order
pub fn build_collection(
    dataset: &InfrastructureDataset,
    routes: &[RenderedRoute<'_>],
) -> FeatureCollection {
    let mut features: Vec<Feature> = Vec::new();
    features.extend(dataset.stations.iter().filter_map(|s| facility_feature(s)));
    features.extend(dataset.terminals.iter().filter_map(|t| facility_feature(t)));
    features.extend(
        dataset
            .production_fields
            .iter()
            .filter_map(|f| facility_feature(f)),
    );
    features.extend(routes.iter().map(route_feature));

    FeatureCollection {
        bbox: collection_bbox(dataset, routes),
        features,
        foreign_members: None,
    }
}

/// Write the network to a GeoJSON file
pub fn write_network_geojson(
    dataset: &InfrastructureDataset,
    routes: &[RenderedRoute<'_>],
    output_path: &Path,
) -> Result<usize> {
    let feature_collection = build_collection(dataset, routes);
    let count = feature_collection.features.len();
    log::info!("Writing {} features to {}", count, output_path.display());

    let geojson = GeoJson::from(feature_collection);
    let json_string = serde_json::to_string_pretty(&geojson)
        .context("Failed to serialize GeoJSON")?;

    std::fs::write(output_path, json_string)
        .with_context(|| format!("Failed to write GeoJSON to {}", output_path.display()))?;

    Ok(count)
}
