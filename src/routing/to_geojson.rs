//! GeoJSON export of a computed route for external visualization tooling
//!
//! The core never renders anything itself; it hands this record to
//! whatever drawing collaborator the caller wires up.

use geojson::{Feature, FeatureCollection};
use serde_json::json;

use super::evaluate::Summary;
use super::search::Route;
use crate::graph::EnergyGraph;

/// Renders the route as a `FeatureCollection` holding one LineString
/// feature with the evaluator's aggregates as properties.
pub fn route_to_geojson(graph: &EnergyGraph, route: &Route, summary: &Summary) -> FeatureCollection {
    let network = graph.network();

    let mut coordinates: Vec<Vec<f64>> = Vec::new();
    for &edge in &route.edges {
        if let Ok(weight) = network.edge(edge) {
            for coord in &weight.geometry.0 {
                let duplicate = coordinates
                    .last()
                    .is_some_and(|last| last[0] == coord.x && last[1] == coord.y);
                if !duplicate {
                    coordinates.push(vec![coord.x, coord.y]);
                }
            }
        }
    }
    if coordinates.is_empty() {
        // Trivial or geometry-less route: fall back to node positions.
        for &node in &route.nodes {
            if let Ok(weight) = network.node(node) {
                coordinates.push(vec![weight.geometry.x(), weight.geometry.y()]);
            }
        }
    }

    let value = json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": coordinates,
        },
        "properties": {
            "total_time": summary.total_time,
            "total_distance": summary.total_distance,
            "total_energy_delta": summary.total_energy_delta,
            "min_remaining_charge": summary.min_remaining_charge,
            "final_charge": summary.final_charge,
            "feasible": summary.feasible,
            "departure": graph.departure().to_rfc3339(),
        }
    });

    let feature: Feature =
        serde_json::from_value(value).expect("feature literal is valid GeoJSON");
    FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    }
}
