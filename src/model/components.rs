//! Road network components - nodes, edges, and derived edge costs

use geo::{LineString, Point};

use crate::{Energy, Time};

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Provider-assigned id of the node (e.g. OSM id)
    pub id: i64,
    /// Node coordinates (lon/lat)
    pub geometry: Point<f64>,
    /// Elevation above sea level in meters, when the provider has it
    pub elevation: Option<f64>,
}

/// Road graph edge (directed street segment)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Provider-assigned id of the segment
    pub id: i64,
    /// Segment length in meters
    pub length: f64,
    /// Base travel time in seconds
    pub travel_time: Time,
    /// Signed grade as rise over run, when the provider has it
    pub grade: Option<f64>,
    /// Segment geometry for exposure queries and visualization
    pub geometry: LineString<f64>,
}

impl RoadEdge {
    /// Representative point of the segment, used as the solar exposure
    /// query location. `None` when the segment has no geometry.
    pub fn midpoint(&self) -> Option<Point<f64>> {
        let coords = &self.geometry.0;
        match coords.len() {
            0 => None,
            1 => Some(coords[0].into()),
            2 => Some(Point::new(
                (coords[0].x + coords[1].x) / 2.0,
                (coords[0].y + coords[1].y) / 2.0,
            )),
            n => Some(coords[n / 2].into()),
        }
    }
}

/// Derived per-edge cost pair attached by graph augmentation. Never
/// mutated by the router; re-augment to recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCost {
    /// Traversal time in seconds, always non-negative
    pub time_cost: Time,
    /// Net energy in kWh; negative means the segment gains more from
    /// solar than it consumes
    pub energy_cost: Energy,
}
