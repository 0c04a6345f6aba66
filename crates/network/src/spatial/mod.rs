//! Spatial indexing, filtering and query utilities.

pub mod filter;
pub mod index;
pub mod queries;

pub use filter::{filter_in_bounds, InBounds};
pub use queries::{haversine_distance, haversine_distance_to_line, path_length_m};
