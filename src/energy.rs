//! Energy cost model: net per-edge energy from consumption and solar gain

use chrono::{DateTime, Duration, Utc};

use crate::error::Error;
use crate::model::{EdgeCost, RoadEdge, VehicleProfile};
use crate::solar::SolarExposure;

/// Extra consumption per unit of grade: at `grade = 0.1` (a 10 % climb) an
/// edge costs `1.0 + 0.1 * GRADE_FACTOR` times its flat consumption.
const GRADE_FACTOR: f64 = 8.0;

/// Net energy cost of one edge for the given vehicle.
///
/// Solar exposure is queried at the edge midpoint, halfway through the
/// traversal. Net gain yields a negative `energy_cost`, preserved as-is so
/// the router can exploit it. Zero-length edges cost zero energy.
///
/// # Errors
///
/// `DataUnavailable` when the midpoint/time is outside solar coverage or
/// the edge has no geometry to query; callers decide the fallback
/// (augmentation uses [`base_cost`]).
pub fn edge_cost(
    edge: &RoadEdge,
    profile: &VehicleProfile,
    solar: &dyn SolarExposure,
    departure: DateTime<Utc>,
) -> Result<EdgeCost, Error> {
    if edge.length == 0.0 {
        return Ok(EdgeCost {
            time_cost: edge.travel_time,
            energy_cost: 0.0,
        });
    }

    let midpoint = edge.midpoint().ok_or(Error::DataUnavailable)?;
    let midway = departure + Duration::milliseconds((edge.travel_time * 500.0) as i64);
    let irradiance = solar.exposure(midpoint, midway)?;

    // W/m² * m² * h = Wh
    let gain = irradiance * profile.conversion_efficiency() * (edge.travel_time / 3600.0) / 1000.0;

    Ok(EdgeCost {
        time_cost: edge.travel_time,
        energy_cost: consumption(edge, profile) - gain,
    })
}

/// Cost with zero solar gain: the documented coverage-miss fallback.
pub fn base_cost(edge: &RoadEdge, profile: &VehicleProfile) -> EdgeCost {
    let energy_cost = if edge.length == 0.0 {
        0.0
    } else {
        consumption(edge, profile)
    };
    EdgeCost {
        time_cost: edge.travel_time,
        energy_cost,
    }
}

fn consumption(edge: &RoadEdge, profile: &VehicleProfile) -> f64 {
    let grade_adjust = edge
        .grade
        .map_or(1.0, |grade| (1.0 + GRADE_FACTOR * grade).max(0.0));
    (edge.length / 1000.0) * profile.consumption_rate * grade_adjust
}
