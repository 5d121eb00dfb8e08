//! CLI command implementations.

pub mod params;
pub mod patch;
pub mod render;
