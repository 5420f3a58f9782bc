//! Label-setting multi-objective search over (node, remaining-charge)
//! states
//!
//! A single-scalar Dijkstra relaxation cannot handle this problem: energy
//! both drains (consumption) and recovers (solar gain, capped at battery
//! capacity), so two paths to the same node are incomparable when one is
//! faster and the other arrives with more charge. The search instead keeps
//! a Pareto frontier of labels per node and orders expansion by the
//! caller's blended cost `alpha * time + (1 - alpha) * energy`. Per-edge
//! blended increments are clamped at zero, which keeps the priority key
//! monotone along any path even across net-gain edges, so the first pop of
//! the destination is cost-optimal.

use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use log::debug;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::state::{Label, LabelStore, QueueEntry};
use crate::error::Error;
use crate::graph::EnergyGraph;
use crate::model::{RoadNetwork, VehicleProfile};
use crate::{Energy, Time};

/// Router tunables.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Charge discretization in kWh. Smaller buckets keep more alternative
    /// labels alive per node: better routes, slower search.
    pub charge_bucket: Energy,
    /// Upper bound on heap pops before the search gives up.
    pub max_steps: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            charge_bucket: 0.05,
            max_steps: 2_000_000,
        }
    }
}

/// A computed route. `feasible` is false when the best candidate dips
/// below the vehicle's safety floor; such routes are returned for
/// diagnostics, not for driving.
#[derive(Debug, Clone)]
pub struct Route {
    /// Visited nodes, origin first
    pub nodes: Vec<NodeIndex>,
    /// Edges taken, in travel order
    pub edges: Vec<EdgeIndex>,
    /// Total travel time in seconds
    pub total_time: Time,
    /// Net energy drawn from the battery in kWh: initial charge minus
    /// final charge, with capacity-wasted solar accounted. Negative means
    /// the vehicle arrives with more charge than it left with.
    pub total_energy_delta: Energy,
    pub feasible: bool,
}

/// Finds a route from `origin` to `destination` minimizing the blended
/// cost, subject to the charge never dropping below the profile's safety
/// floor. `alpha` = 1 is pure shortest-time, `alpha` = 0 pure
/// least-energy.
///
/// When no feasible route exists, the search reruns without the floor and
/// returns the best candidate flagged `feasible: false`, so callers can
/// inspect the near-miss.
///
/// Deterministic: identical inputs produce identical routes.
///
/// # Errors
///
/// - `InvalidNodeIndex` / `InvalidData` for malformed inputs,
/// - `DisconnectedGraph` when the destination is structurally unreachable,
/// - `BudgetExhausted` when `max_steps` ran out before any candidate.
pub fn compute_route(
    graph: &EnergyGraph,
    origin: NodeIndex,
    destination: NodeIndex,
    profile: &VehicleProfile,
    alpha: f64,
    config: &SearchConfig,
) -> Result<Route, Error> {
    profile.validate()?;
    if !(0.0..=1.0).contains(&alpha) {
        return Err(Error::InvalidData(format!("alpha {alpha} outside [0, 1]")));
    }
    if config.charge_bucket <= 0.0 {
        return Err(Error::InvalidData(format!(
            "charge_bucket must be positive, got {}",
            config.charge_bucket
        )));
    }

    let network = graph.network();
    network.node(origin)?;
    network.node(destination)?;

    if origin == destination {
        let start_charge = profile.initial_charge.min(profile.battery_capacity);
        return Ok(Route {
            nodes: vec![origin],
            edges: vec![],
            total_time: 0.0,
            total_energy_delta: 0.0,
            feasible: start_charge >= profile.min_safe_charge,
        });
    }

    if !reachable(network, origin, destination) {
        return Err(Error::DisconnectedGraph);
    }

    if let Some(route) = search(graph, origin, destination, profile, alpha, config, true) {
        return Ok(route);
    }

    debug!("no feasible candidate for {origin:?} -> {destination:?}; rerunning without the charge floor");
    match search(graph, origin, destination, profile, alpha, config, false) {
        Some(route) => Ok(Route {
            feasible: false,
            ..route
        }),
        None => Err(Error::BudgetExhausted),
    }
}

/// Plain reachability pre-check, so a disconnected pair is reported as a
/// structural error instead of burning the full search budget twice.
fn reachable(network: &RoadNetwork, origin: NodeIndex, destination: NodeIndex) -> bool {
    let graph = &network.graph;
    let mut visited = FixedBitSet::with_capacity(graph.node_count());
    let mut stack = vec![origin];
    visited.insert(origin.index());

    while let Some(node) = stack.pop() {
        if node == destination {
            return true;
        }
        for next in graph.neighbors(node) {
            if !visited.put(next.index()) {
                stack.push(next);
            }
        }
    }
    false
}

fn search(
    graph: &EnergyGraph,
    origin: NodeIndex,
    destination: NodeIndex,
    profile: &VehicleProfile,
    alpha: f64,
    config: &SearchConfig,
    enforce_floor: bool,
) -> Option<Route> {
    let network = graph.network();
    let capacity = profile.battery_capacity;
    let start_charge = profile.initial_charge.min(capacity);

    if enforce_floor && start_charge < profile.min_safe_charge {
        return None;
    }

    let mut labels: Vec<Label> = Vec::new();
    let mut store = LabelStore::new(config.charge_bucket);
    let mut heap = BinaryHeap::new();

    labels.push(Label {
        node: origin,
        time: 0.0,
        charge: start_charge,
        blended: 0.0,
        pred: None,
    });
    store.insert(origin, 0.0, start_charge, 0.0, 0);
    heap.push(QueueEntry {
        blended: 0.0,
        time: 0.0,
        charge: start_charge,
        node: origin,
        label: 0,
    });

    let mut steps = 0usize;
    while let Some(entry) = heap.pop() {
        steps += 1;
        if steps > config.max_steps {
            debug!(
                "step budget {} exhausted with {} labels generated",
                config.max_steps,
                labels.len()
            );
            return None;
        }
        if !store.is_live(entry.node, entry.label) {
            continue;
        }
        if entry.node == destination {
            debug!(
                "destination settled after {steps} pops, {} labels",
                labels.len()
            );
            return Some(reconstruct(network, &labels, entry.label));
        }

        let current = labels[entry.label];
        for edge in network.graph.edges(current.node) {
            let cost = graph.cost(edge.id());
            let next_node = edge.target();
            let next_time = current.time + cost.time_cost;
            // Excess solar beyond capacity is wasted, not banked.
            let next_charge = (current.charge - cost.energy_cost).min(capacity);
            if enforce_floor && next_charge < profile.min_safe_charge {
                continue;
            }

            let spent = current.charge - next_charge;
            // Clamp keeps the heap key monotone across net-gain edges.
            let increment = (alpha * cost.time_cost + (1.0 - alpha) * spent).max(0.0);
            let next_blended = current.blended + increment;

            let label_idx = labels.len();
            if store.insert(next_node, next_time, next_charge, next_blended, label_idx) {
                labels.push(Label {
                    node: next_node,
                    time: next_time,
                    charge: next_charge,
                    blended: next_blended,
                    pred: Some((entry.label, edge.id())),
                });
                heap.push(QueueEntry {
                    blended: next_blended,
                    time: next_time,
                    charge: next_charge,
                    node: next_node,
                    label: label_idx,
                });
            }
        }
    }
    None
}

fn reconstruct(network: &RoadNetwork, labels: &[Label], last: usize) -> Route {
    let mut edges = Vec::new();
    let mut cursor = last;
    while let Some((pred, edge)) = labels[cursor].pred {
        edges.push(edge);
        cursor = pred;
    }
    edges.reverse();

    // `cursor` now sits on the root label.
    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(labels[cursor].node);
    for &edge in &edges {
        let (_, target) = network
            .graph
            .edge_endpoints(edge)
            .expect("label edges come from this graph");
        nodes.push(target);
    }

    let end = labels[last];
    Route {
        nodes,
        edges,
        total_time: end.time,
        total_energy_delta: labels[cursor].charge - end.charge,
        feasible: true,
    }
}
