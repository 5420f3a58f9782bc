//! Graph augmentation: attach per-edge time and energy costs to a road
//! network for one routing request
//!
//! Augmentation only derives cost data. Topology is the base network's,
//! untouched: edges that look individually unaffordable stay in, because
//! feasibility is a path-level property decided by the router.

use chrono::{DateTime, Utc};
use log::{info, warn};
use petgraph::graph::EdgeIndex;

use crate::energy::{base_cost, edge_cost};
use crate::error::Error;
use crate::model::{EdgeCost, RoadNetwork, VehicleProfile};
use crate::solar::SolarExposure;

/// A road network with one [`EdgeCost`] per edge, computed for a specific
/// vehicle and departure time. Shared read-only between concurrent
/// requests; re-augment when solar data or vehicle parameters change.
#[derive(Debug)]
pub struct EnergyGraph<'a> {
    network: &'a RoadNetwork,
    costs: Vec<EdgeCost>,
    departure: DateTime<Utc>,
    degraded_edges: usize,
}

impl EnergyGraph<'_> {
    pub fn network(&self) -> &RoadNetwork {
        self.network
    }

    pub fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    /// Edges whose solar lookup missed coverage and fell back to a
    /// zero-gain estimate.
    pub fn degraded_edges(&self) -> usize {
        self.degraded_edges
    }

    /// Cost of an edge of the underlying network. The index must come from
    /// that network's graph.
    pub fn cost(&self, edge: EdgeIndex) -> EdgeCost {
        self.costs[edge.index()]
    }
}

/// Builds the weighted graph for one request, costing every edge with the
/// energy model. Coverage misses are recovered with the zero-gain fallback
/// and reported once as a degraded-estimate warning.
///
/// # Errors
///
/// Returns an error only for an invalid vehicle profile; solar coverage
/// gaps are handled by the fallback.
pub fn augment<'a>(
    network: &'a RoadNetwork,
    profile: &VehicleProfile,
    solar: &dyn SolarExposure,
    departure: DateTime<Utc>,
) -> Result<EnergyGraph<'a>, Error> {
    profile.validate()?;

    let edge_count = network.graph.edge_count();
    let mut costs = Vec::with_capacity(edge_count);
    let mut degraded = 0usize;

    // edge_references iterates in edge-index order, so push keeps the
    // costs vector parallel to the graph's edge indices.
    for edge in network.graph.edge_references() {
        let cost = match edge_cost(edge.weight(), profile, solar, departure) {
            Ok(cost) => cost,
            Err(Error::DataUnavailable) => {
                degraded += 1;
                base_cost(edge.weight(), profile)
            }
            Err(other) => return Err(other),
        };
        debug_assert!(cost.time_cost >= 0.0);
        costs.push(cost);
    }

    if degraded > 0 {
        warn!(
            "{degraded} of {edge_count} edges lacked solar coverage; \
            their costs are zero-gain estimates"
        );
    }
    info!("Augmented graph: {edge_count} edges costed for departure {departure}");

    Ok(EnergyGraph {
        network,
        costs,
        departure,
        degraded_edges: degraded,
    })
}
