//! Vehicle energy profile, supplied by the caller per routing request

use serde::{Deserialize, Serialize};

use crate::Energy;
use crate::error::Error;

/// Battery, consumption, and solar panel parameters of the routed vehicle.
/// Immutable for the duration of a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Usable battery capacity in kWh. Solar gain beyond this is wasted,
    /// not banked.
    pub battery_capacity: Energy,
    /// Charge at departure in kWh
    pub initial_charge: Energy,
    /// Consumption in kWh per kilometer on flat ground
    pub consumption_rate: f64,
    /// Roof panel area in square meters
    pub panel_area: f64,
    /// Panel conversion efficiency, 0..=1
    pub panel_efficiency: f64,
    /// Fraction of panel output surviving wiring and charging losses, 0..=1
    pub system_losses: f64,
    /// Charge the router must never plan below, in kWh
    pub min_safe_charge: Energy,
}

impl VehicleProfile {
    /// Combined irradiance-to-battery conversion factor in m² (multiply by
    /// W/m² and hours to get Wh).
    pub fn conversion_efficiency(&self) -> f64 {
        self.panel_area * self.panel_efficiency * self.system_losses
    }

    /// # Errors
    ///
    /// Returns `InvalidData` describing the first out-of-range field.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.battery_capacity.is_finite() && self.battery_capacity > 0.0) {
            return Err(Error::InvalidData(format!(
                "battery_capacity must be positive, got {}",
                self.battery_capacity
            )));
        }
        if !(self.initial_charge.is_finite() && self.initial_charge >= 0.0) {
            return Err(Error::InvalidData(format!(
                "initial_charge must be non-negative, got {}",
                self.initial_charge
            )));
        }
        if !(self.consumption_rate.is_finite() && self.consumption_rate >= 0.0) {
            return Err(Error::InvalidData(format!(
                "consumption_rate must be non-negative, got {}",
                self.consumption_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.panel_efficiency) {
            return Err(Error::InvalidData(format!(
                "panel_efficiency must be within [0, 1], got {}",
                self.panel_efficiency
            )));
        }
        if !(0.0..=1.0).contains(&self.system_losses) {
            return Err(Error::InvalidData(format!(
                "system_losses must be within [0, 1], got {}",
                self.system_losses
            )));
        }
        if !(self.panel_area.is_finite() && self.panel_area >= 0.0) {
            return Err(Error::InvalidData(format!(
                "panel_area must be non-negative, got {}",
                self.panel_area
            )));
        }
        if !(0.0..=self.battery_capacity).contains(&self.min_safe_charge) {
            return Err(Error::InvalidData(format!(
                "min_safe_charge must be within [0, battery_capacity], got {}",
                self.min_safe_charge
            )));
        }
        Ok(())
    }
}

impl Default for VehicleProfile {
    /// Typical solar passenger car: 1.5 m² roof panel at 20 % efficiency
    /// with 15 % system losses.
    fn default() -> Self {
        Self {
            battery_capacity: 60.0,
            initial_charge: 60.0,
            consumption_rate: 0.17,
            panel_area: 1.5,
            panel_efficiency: 0.20,
            system_losses: 0.85,
            min_safe_charge: 3.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_validates() {
        VehicleProfile::default().validate().unwrap();
    }

    #[test]
    fn floor_above_capacity_rejected() {
        let profile = VehicleProfile {
            min_safe_charge: 100.0,
            ..VehicleProfile::default()
        };
        assert!(matches!(profile.validate(), Err(Error::InvalidData(_))));
    }
}
