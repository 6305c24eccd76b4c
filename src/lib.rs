pub mod classify;
pub mod config;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod gi_star;
pub mod grid;
pub mod neighbors;
pub mod pipeline;
pub mod report;
pub mod result_set;
