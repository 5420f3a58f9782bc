//! Multi-objective route search and evaluation

pub mod batch;
pub mod evaluate;
pub mod pareto;
pub mod search;
mod state;
pub mod to_geojson;

// Re-export main interfaces
pub use batch::compute_route_many;
pub use evaluate::{Summary, evaluate_route};
pub use pareto::compute_alternatives;
pub use search::{Route, SearchConfig, compute_route};
pub use to_geojson::route_to_geojson;
