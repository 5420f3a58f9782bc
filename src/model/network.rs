//! Road network graph with a spatial index for node snapping

use geo::{LineString, Point};
use hashbrown::HashMap;
use log::info;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::error::Error;
use crate::model::components::{RoadEdge, RoadNode};

/// R-tree entry mapping a `[lon, lat]` point to its graph node.
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

pub type RoadGraph = DiGraph<RoadNode, RoadEdge>;

/// Immutable road network: a directed graph plus an R-tree over node
/// coordinates for snapping arbitrary points to graph nodes.
///
/// Built once from map provider output and shared read-only between
/// concurrent routing requests.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub graph: RoadGraph,
    index: RTree<IndexedPoint>,
}

impl RoadNetwork {
    /// Builds a network from map provider output: geocoded nodes and
    /// directed edges referencing them by provider id. Two-way streets are
    /// expected as two edges.
    ///
    /// Edges with no geometry get a straight segment between their
    /// endpoints so exposure queries always have a midpoint.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate node ids, edges referencing unknown
    /// nodes, or negative lengths/travel times.
    pub fn from_parts(
        nodes: Vec<RoadNode>,
        edges: Vec<(i64, i64, RoadEdge)>,
    ) -> Result<Self, Error> {
        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut by_id: HashMap<i64, NodeIndex> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let id = node.id;
            let idx = graph.add_node(node);
            if by_id.insert(id, idx).is_some() {
                return Err(Error::InvalidData(format!("duplicate node id {id}")));
            }
        }

        for (from, to, mut edge) in edges {
            let (a, b) = match (by_id.get(&from), by_id.get(&to)) {
                (Some(&a), Some(&b)) => (a, b),
                _ => {
                    return Err(Error::InvalidData(format!(
                        "edge {} references unknown node ({from} -> {to})",
                        edge.id
                    )));
                }
            };
            if edge.length < 0.0 || edge.travel_time < 0.0 {
                return Err(Error::InvalidData(format!(
                    "edge {} has negative length or travel time",
                    edge.id
                )));
            }
            if edge.geometry.0.is_empty() {
                edge.geometry = LineString::from(vec![graph[a].geometry, graph[b].geometry]);
            }
            graph.add_edge(a, b, edge);
        }

        let index = RTree::bulk_load(
            graph
                .node_indices()
                .map(|idx| {
                    let point = graph[idx].geometry;
                    IndexedPoint::new([point.x(), point.y()], idx)
                })
                .collect(),
        );

        info!(
            "Road network built: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self { graph, index })
    }

    /// Nearest graph node to the given point.
    ///
    /// # Errors
    ///
    /// Returns `NoPointsFound` on an empty network.
    pub fn nearest_node(&self, point: Point<f64>) -> Result<NodeIndex, Error> {
        self.index
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|entry| entry.data)
            .ok_or(Error::NoPointsFound)
    }

    pub fn node(&self, idx: NodeIndex) -> Result<&RoadNode, Error> {
        self.graph.node_weight(idx).ok_or(Error::InvalidNodeIndex)
    }

    pub fn edge(&self, idx: EdgeIndex) -> Result<&RoadEdge, Error> {
        self.graph.edge_weight(idx).ok_or(Error::InvalidNodeIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, lon: f64, lat: f64) -> RoadNode {
        RoadNode {
            id,
            geometry: Point::new(lon, lat),
            elevation: None,
        }
    }

    fn edge(id: i64) -> RoadEdge {
        RoadEdge {
            id,
            length: 100.0,
            travel_time: 10.0,
            grade: None,
            geometry: LineString::new(vec![]),
        }
    }

    #[test]
    fn duplicate_node_id_rejected() {
        let result = RoadNetwork::from_parts(vec![node(1, 0.0, 0.0), node(1, 1.0, 1.0)], vec![]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn dangling_edge_rejected() {
        let result =
            RoadNetwork::from_parts(vec![node(1, 0.0, 0.0)], vec![(1, 99, edge(10))]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn snapping_picks_nearest_node() {
        let network = RoadNetwork::from_parts(
            vec![node(1, 0.0, 0.0), node(2, 1.0, 0.0)],
            vec![(1, 2, edge(10))],
        )
        .unwrap();

        let snapped = network.nearest_node(Point::new(0.9, 0.1)).unwrap();
        assert_eq!(network.node(snapped).unwrap().id, 2);
    }

    #[test]
    fn missing_geometry_filled_from_endpoints() {
        let network = RoadNetwork::from_parts(
            vec![node(1, 0.0, 0.0), node(2, 1.0, 0.0)],
            vec![(1, 2, edge(10))],
        )
        .unwrap();

        let idx = network.graph.edge_indices().next().unwrap();
        let midpoint = network.edge(idx).unwrap().midpoint().unwrap();
        assert!((midpoint.x() - 0.5).abs() < 1e-12);
        assert!(midpoint.y().abs() < 1e-12);
    }
}
