//! Energy-and-time-aware routing for solar-powered electric vehicles.
//!
//! The crate takes a road network from a map provider, irradiance samples
//! from a solar data provider, and a vehicle profile, and computes routes
//! that trade travel time against net energy balance: consumption offset by
//! solar charging along the way.
//!
//! Pipeline: [`model::RoadNetwork`] + [`solar::SolarExposure`] →
//! [`graph::augment`] → [`routing::compute_route`] →
//! [`routing::evaluate_route`].

pub mod energy;
pub mod error;
pub mod graph;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod solar;

pub use error::Error;
pub use graph::{EnergyGraph, augment};
pub use model::{EdgeCost, RoadEdge, RoadNetwork, RoadNode, VehicleProfile};
pub use routing::{
    Route, SearchConfig, Summary, compute_alternatives, compute_route, compute_route_many,
    evaluate_route, route_to_geojson,
};
pub use solar::{DiurnalSolar, SolarExposure, SolarGrid, SolarSample, UniformSolar};

/// Travel time in seconds.
pub type Time = f64;

/// Energy in kilowatt-hours. Negative values are net gain.
pub type Energy = f64;
