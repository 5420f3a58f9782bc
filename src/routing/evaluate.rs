//! Independent route evaluation
//!
//! Recomputes aggregates from the edge sequence alone, as an audit of the
//! router's internal bookkeeping. A disagreement between the two beyond
//! floating-point tolerance indicates a router bug.

use itertools::Itertools;
use serde::Serialize;

use super::search::Route;
use crate::error::Error;
use crate::graph::EnergyGraph;
use crate::model::VehicleProfile;
use crate::{Energy, Time};

/// Aggregates recomputed from a route, for reporting and visualization by
/// external tooling.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Summary {
    /// Total travel time in seconds
    pub total_time: Time,
    /// Total distance in meters
    pub total_distance: f64,
    /// Net energy drawn from the battery in kWh (negative = net gain)
    pub total_energy_delta: Energy,
    /// Lowest running charge anywhere along the route, in kWh
    pub min_remaining_charge: Energy,
    /// Charge on arrival, in kWh
    pub final_charge: Energy,
    /// Whether the running charge stayed at or above the safety floor
    pub feasible: bool,
}

/// Replays the route edge by edge against the graph's costs.
///
/// # Errors
///
/// `InvalidRoute` when the edge sequence is non-contiguous, references
/// edges absent from the graph, or disagrees with the node sequence. These
/// indicate a router bug, not a user error.
pub fn evaluate_route(
    graph: &EnergyGraph,
    route: &Route,
    profile: &VehicleProfile,
) -> Result<Summary, Error> {
    profile.validate()?;
    let network = graph.network();

    if route.nodes.len() != route.edges.len() + 1 {
        return Err(Error::InvalidRoute(format!(
            "{} nodes do not match {} edges",
            route.nodes.len(),
            route.edges.len()
        )));
    }
    for (&edge, (&from, &to)) in route.edges.iter().zip(route.nodes.iter().tuple_windows()) {
        if endpoints(graph, edge)? != (from, to) {
            return Err(Error::InvalidRoute(format!(
                "edge {} does not connect nodes {} and {}",
                edge.index(),
                from.index(),
                to.index()
            )));
        }
    }

    let capacity = profile.battery_capacity;
    let start_charge = profile.initial_charge.min(capacity);

    let mut total_time = 0.0;
    let mut total_distance = 0.0;
    let mut charge = start_charge;
    let mut min_charge = charge;

    for &edge in &route.edges {
        let weight = network.edge(edge).map_err(|_| {
            Error::InvalidRoute(format!("edge {} is not part of the graph", edge.index()))
        })?;
        let cost = graph.cost(edge);

        total_time += cost.time_cost;
        total_distance += weight.length;
        charge = (charge - cost.energy_cost).min(capacity);
        min_charge = min_charge.min(charge);
    }

    Ok(Summary {
        total_time,
        total_distance,
        total_energy_delta: start_charge - charge,
        min_remaining_charge: min_charge,
        final_charge: charge,
        feasible: min_charge >= profile.min_safe_charge,
    })
}

fn endpoints(
    graph: &EnergyGraph,
    edge: petgraph::graph::EdgeIndex,
) -> Result<(petgraph::graph::NodeIndex, petgraph::graph::NodeIndex), Error> {
    graph
        .network()
        .graph
        .edge_endpoints(edge)
        .ok_or_else(|| Error::InvalidRoute(format!("edge {} is not part of the graph", edge.index())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::augment;
    use crate::model::{RoadEdge, RoadNetwork, RoadNode};
    use crate::solar::UniformSolar;
    use chrono::{TimeZone, Utc};
    use geo::{LineString, Point};

    fn triangle() -> RoadNetwork {
        let node = |id: i64, lon: f64| RoadNode {
            id,
            geometry: Point::new(lon, 0.0),
            elevation: None,
        };
        let edge = |id: i64| RoadEdge {
            id,
            length: 1000.0,
            travel_time: 60.0,
            grade: None,
            geometry: LineString::new(vec![]),
        };
        RoadNetwork::from_parts(
            vec![node(1, 0.0), node(2, 0.01), node(3, 0.02)],
            vec![(1, 2, edge(10)), (2, 3, edge(11)), (1, 3, edge(12))],
        )
        .unwrap()
    }

    #[test]
    fn non_contiguous_route_rejected() {
        let network = triangle();
        let departure = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let profile = VehicleProfile::default();
        let graph = augment(&network, &profile, &UniformSolar::new(0.0), departure).unwrap();

        let mut edge_indices = network.graph.edge_indices();
        let ab = edge_indices.next().unwrap();
        let _bc = edge_indices.next().unwrap();
        let ac = edge_indices.next().unwrap();

        // a->b followed by a->c skips node b.
        let route = Route {
            nodes: vec![
                petgraph::graph::NodeIndex::new(0),
                petgraph::graph::NodeIndex::new(1),
                petgraph::graph::NodeIndex::new(2),
            ],
            edges: vec![ab, ac],
            total_time: 120.0,
            total_energy_delta: 0.0,
            feasible: true,
        };

        let result = evaluate_route(&graph, &route, &profile);
        assert!(matches!(result, Err(Error::InvalidRoute(_))));
    }

    #[test]
    fn corrupted_node_sequence_rejected() {
        let network = triangle();
        let departure = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let profile = VehicleProfile::default();
        let graph = augment(&network, &profile, &UniformSolar::new(0.0), departure).unwrap();

        let mut edge_indices = network.graph.edge_indices();
        let ab = edge_indices.next().unwrap();
        let bc = edge_indices.next().unwrap();

        // Valid edge sequence, but the node list does not match it.
        let route = Route {
            nodes: vec![
                petgraph::graph::NodeIndex::new(0),
                petgraph::graph::NodeIndex::new(0),
                petgraph::graph::NodeIndex::new(0),
            ],
            edges: vec![ab, bc],
            total_time: 120.0,
            total_energy_delta: 0.0,
            feasible: true,
        };

        let result = evaluate_route(&graph, &route, &profile);
        assert!(matches!(result, Err(Error::InvalidRoute(_))));
    }

    #[test]
    fn aggregates_recomputed_from_costs() {
        let network = triangle();
        let departure = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let profile = VehicleProfile::default();
        let graph = augment(&network, &profile, &UniformSolar::new(0.0), departure).unwrap();

        let mut edge_indices = network.graph.edge_indices();
        let ab = edge_indices.next().unwrap();
        let bc = edge_indices.next().unwrap();

        let route = Route {
            nodes: vec![
                petgraph::graph::NodeIndex::new(0),
                petgraph::graph::NodeIndex::new(1),
                petgraph::graph::NodeIndex::new(2),
            ],
            edges: vec![ab, bc],
            total_time: 0.0, // deliberately wrong; evaluator must not trust it
            total_energy_delta: 0.0,
            feasible: true,
        };

        let summary = evaluate_route(&graph, &route, &profile).unwrap();
        assert!((summary.total_time - 120.0).abs() < 1e-9);
        assert!((summary.total_distance - 2000.0).abs() < 1e-9);
        assert!((summary.total_energy_delta - 2.0 * profile.consumption_rate).abs() < 1e-9);
        assert!(summary.feasible);
    }
}
