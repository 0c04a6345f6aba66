//! Infrastructure records as read from the backend.
//!
//! Only the fields the geospatial core consumes are modelled; unknown fields
//! are ignored on deserialization.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::identifiers::*;
use crate::models::types::is_valid_coordinate;

/// Embedded position of a point facility.
///
/// The backend serves either flat `latitude`/`longitude` fields or a nested
/// `location` object; flat fields win when both are present.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub location: Option<EmbeddedLocation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            location: None,
        }
    }

    /// Valid point for this position, if any.
    pub fn point(&self) -> Option<Point> {
        let (lat, lng) = match (self.latitude, self.longitude, &self.location) {
            (Some(lat), Some(lng), _) => (lat, lng),
            (_, _, Some(loc)) => (loc.latitude, loc.longitude),
            _ => return None,
        };

        is_valid_coordinate(lat, lng).then(|| Point::new(lng, lat))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: StationId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub operational_status: Option<String>,
    #[serde(flatten)]
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Terminal {
    pub id: TerminalId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub operational_status: Option<String>,
    #[serde(flatten)]
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionField {
    pub id: ProductionFieldId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub operational_status: Option<String>,
    #[serde(flatten)]
    pub position: Position,
}

/// A pipeline between two terminals.
///
/// Geometry lives elsewhere: either in child segments fetched separately, or
/// in the direct `coordinate_ids` list, or (legacy schema) in `location_ids`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: PipelineId,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub operational_status: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub departure_terminal_id: Option<TerminalId>,
    #[serde(default)]
    pub arrival_terminal_id: Option<TerminalId>,
    #[serde(default)]
    pub length_km: Option<f64>,
    #[serde(default)]
    pub nominal_diameter_mm: Option<f64>,
    #[serde(default)]
    pub coordinate_ids: Vec<CoordinateId>,
    #[serde(default)]
    pub location_ids: Vec<LocationId>,
}

impl Pipeline {
    pub fn new(id: PipelineId) -> Self {
        Self {
            id,
            code: String::new(),
            name: String::new(),
            operational_status: None,
            product: None,
            departure_terminal_id: None,
            arrival_terminal_id: None,
            length_km: None,
            nominal_diameter_mm: None,
            coordinate_ids: Vec::new(),
            location_ids: Vec::new(),
        }
    }

    pub fn between(mut self, departure: TerminalId, arrival: TerminalId) -> Self {
        self.departure_terminal_id = Some(departure);
        self.arrival_terminal_id = Some(arrival);
        self
    }

    /// `(departure, arrival)` when both terminals are known.
    pub fn terminals(&self) -> Option<(TerminalId, TerminalId)> {
        Some((self.departure_terminal_id?, self.arrival_terminal_id?))
    }
}

/// One stretch of a pipeline, positioned by `start_point` along the line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSegment {
    #[serde(default)]
    pub id: Option<SegmentId>,
    #[serde(default)]
    pub pipeline_id: Option<PipelineId>,
    #[serde(default)]
    pub start_point: Option<f64>,
    #[serde(default)]
    pub coordinate_ids: Vec<CoordinateId>,
}

/// Any infrastructure record the console shows on the map.
#[derive(Clone, Debug, PartialEq)]
pub enum InfrastructureEntity {
    Station(Station),
    Terminal(Terminal),
    ProductionField(ProductionField),
    Pipeline(Pipeline),
}

impl InfrastructureEntity {
    pub fn code(&self) -> &str {
        match self {
            Self::Station(s) => &s.code,
            Self::Terminal(t) => &t.code,
            Self::ProductionField(f) => &f.code,
            Self::Pipeline(p) => &p.code,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Station(s) => &s.name,
            Self::Terminal(t) => &t.name,
            Self::ProductionField(f) => &f.name,
            Self::Pipeline(p) => &p.name,
        }
    }

    pub fn operational_status(&self) -> Option<&str> {
        match self {
            Self::Station(s) => s.operational_status.as_deref(),
            Self::Terminal(t) => t.operational_status.as_deref(),
            Self::ProductionField(f) => f.operational_status.as_deref(),
            Self::Pipeline(p) => p.operational_status.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_flat_position() {
        let station: Station = serde_json::from_str(
            r#"{"id": 1, "code": "SP1", "name": "Pump 1", "operationalStatus": "OPERATIONAL",
                "latitude": 31.67, "longitude": 6.07, "capacity": 1200}"#,
        )
        .unwrap();

        let point = station.position.point().unwrap();
        assert_eq!(point.y(), 31.67);
        assert_eq!(point.x(), 6.07);
        assert_eq!(station.operational_status.as_deref(), Some("OPERATIONAL"));
    }

    #[test]
    fn test_terminal_nested_location() {
        let terminal: Terminal = serde_json::from_str(
            r#"{"id": 4, "code": "T-ARZ", "location": {"latitude": 35.85, "longitude": -0.31}}"#,
        )
        .unwrap();

        let point = terminal.position.point().unwrap();
        assert_eq!(point.y(), 35.85);
        assert_eq!(point.x(), -0.31);
    }

    #[test]
    fn test_position_out_of_range_has_no_point() {
        assert!(Position::at(120.0, 3.0).point().is_none());
        assert!(Position::default().point().is_none());
    }

    #[test]
    fn test_pipeline_defaults() {
        let pipeline: Pipeline = serde_json::from_str(
            r#"{"id": 10, "code": "OB1", "departureTerminalId": 3, "arrivalTerminalId": 8,
                "coordinateIds": [5, 6, 7]}"#,
        )
        .unwrap();

        assert_eq!(
            pipeline.terminals(),
            Some((TerminalId::new(3), TerminalId::new(8)))
        );
        assert_eq!(pipeline.coordinate_ids.len(), 3);
        assert!(pipeline.location_ids.is_empty());
        assert!(pipeline.product.is_none());
    }

    #[test]
    fn test_pipeline_missing_terminal() {
        let mut pipeline = Pipeline::new(PipelineId::new(1));
        pipeline.departure_terminal_id = Some(TerminalId::new(2));
        assert_eq!(pipeline.terminals(), None);
    }
}
