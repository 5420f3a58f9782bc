//! Data model for the road network and vehicle
//!
//! Contains types and structures for representing the routed network.

pub mod components;
pub mod network;
pub mod vehicle;

// Re-export of basic types for convenience
pub use components::{EdgeCost, RoadEdge, RoadNode};
pub use network::{IndexedPoint, RoadGraph, RoadNetwork};
pub use vehicle::VehicleProfile;
