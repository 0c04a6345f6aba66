//! Path geometry: simplification and curve construction.

pub mod curve;
pub mod simplify;

pub use curve::{quadratic_bezier, DEFAULT_CURVE_SEGMENTS};
pub use simplify::{simplify, simplify_path};
