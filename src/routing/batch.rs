//! Parallel fan-out over independent routing requests

use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use super::search::{Route, SearchConfig, compute_route};
use crate::error::Error;
use crate::graph::EnergyGraph;
use crate::model::VehicleProfile;

/// Computes routes for many origin/destination pairs in parallel.
///
/// Requests share the read-only graph; each owns its queue and label
/// state, so no synchronization is needed beyond the graph outliving the
/// call.
pub fn compute_route_many(
    graph: &EnergyGraph,
    pairs: &[(NodeIndex, NodeIndex)],
    profile: &VehicleProfile,
    alpha: f64,
    config: &SearchConfig,
) -> Vec<Result<Route, Error>> {
    pairs
        .par_iter()
        .map(|&(origin, destination)| {
            compute_route(graph, origin, destination, profile, alpha, config)
        })
        .collect()
}
