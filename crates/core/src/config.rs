//! Runtime configuration for the aggregation layer.

use hydromap_network::dataset::RenderOptions;
use hydromap_network::identifiers::PipelineId;
use serde::{Deserialize, Serialize};

/// Backend paths, relative to [`CoreConfig::base_url`].
///
/// `{id}` in the by-id templates is replaced with the numeric id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub stations: String,
    pub terminals: String,
    pub production_fields: String,
    pub pipelines: String,
    pub coordinate: String,
    pub location: String,
    pub pipeline_segments: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            stations: "stations".into(),
            terminals: "terminals".into(),
            production_fields: "production-fields".into(),
            pipelines: "pipelines".into(),
            coordinate: "coordinates/{id}".into(),
            location: "locations/{id}".into(),
            pipeline_segments: "pipeline-segments/pipeline/{id}".into(),
        }
    }
}

impl EndpointConfig {
    pub fn coordinate_path(&self, id: u64) -> String {
        expand(&self.coordinate, id)
    }

    pub fn location_path(&self, id: u64) -> String {
        expand(&self.location, id)
    }

    pub fn segments_path(&self, pipeline: PipelineId) -> String {
        expand(&self.pipeline_segments, pipeline.get())
    }
}

fn expand(template: &str, id: u64) -> String {
    if template.contains("{id}") {
        template.replace("{id}", &id.to_string())
    } else {
        format!("{}/{}", template.trim_end_matches('/'), id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub base_url: String,
    pub page_size: usize,
    pub request_timeout_secs: u64,
    pub endpoints: EndpointConfig,
    pub render: RenderOptions,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".into(),
            page_size: 100,
            request_timeout_secs: 30,
            endpoints: EndpointConfig::default(),
            render: RenderOptions::default(),
        }
    }
}
