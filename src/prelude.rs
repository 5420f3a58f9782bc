// Re-export key components
pub use crate::error::Error;
pub use crate::graph::{EnergyGraph, augment};
pub use crate::loading::{read_solar_samples, solar_grid_from_csv};
pub use crate::model::{EdgeCost, RoadEdge, RoadNetwork, RoadNode, VehicleProfile};
pub use crate::routing::{
    Route, SearchConfig, Summary, compute_alternatives, compute_route, compute_route_many,
    evaluate_route, route_to_geojson,
};
pub use crate::solar::{
    DiurnalSolar, SolarExposure, SolarGrid, SolarGridConfig, SolarSample, UniformSolar,
    diurnal_factor,
};

// Scalar units used throughout the crate
pub use crate::Energy; // kilowatt-hours
pub use crate::Time; // seconds
