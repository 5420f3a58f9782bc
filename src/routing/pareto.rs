//! Pareto-optimal route alternatives
//!
//! Probes the blended search at the energy-optimal, balanced, and
//! time-optimal weights and keeps the mutually nondominated results, so a
//! caller can present "fastest vs. most charge on arrival" choices
//! without re-running the search itself.

use log::debug;
use petgraph::graph::NodeIndex;

use super::evaluate::{Summary, evaluate_route};
use super::search::{Route, SearchConfig, compute_route};
use crate::error::Error;
use crate::graph::EnergyGraph;
use crate::model::VehicleProfile;

/// Blend weights probed for alternatives.
const PROBE_ALPHAS: [f64; 3] = [0.0, 0.5, 1.0];

/// Computes up to three route alternatives, each paired with its
/// independently evaluated summary. Duplicates and candidates dominated
/// in (time, energy) by another candidate are dropped.
///
/// # Errors
///
/// Propagates the first routing or evaluation error; see
/// [`compute_route`].
pub fn compute_alternatives(
    graph: &EnergyGraph,
    origin: NodeIndex,
    destination: NodeIndex,
    profile: &VehicleProfile,
    config: &SearchConfig,
) -> Result<Vec<(Route, Summary)>, Error> {
    let mut candidates: Vec<(Route, Summary)> = Vec::new();
    for alpha in PROBE_ALPHAS {
        let route = compute_route(graph, origin, destination, profile, alpha, config)?;
        if candidates.iter().any(|(seen, _)| seen.edges == route.edges) {
            continue;
        }
        let summary = evaluate_route(graph, &route, profile)?;
        candidates.push((route, summary));
    }

    let keep: Vec<bool> = candidates
        .iter()
        .map(|(route, _)| {
            !candidates.iter().any(|(other, _)| {
                other.total_time <= route.total_time
                    && other.total_energy_delta <= route.total_energy_delta
                    && (other.total_time < route.total_time
                        || other.total_energy_delta < route.total_energy_delta)
            })
        })
        .collect();

    let mut alternatives = Vec::with_capacity(candidates.len());
    for (survives, candidate) in keep.into_iter().zip(candidates) {
        if survives {
            alternatives.push(candidate);
        }
    }

    debug!(
        "{} nondominated alternatives for {origin:?} -> {destination:?}",
        alternatives.len()
    );
    Ok(alternatives)
}
