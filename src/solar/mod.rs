//! Solar exposure model: irradiance as a function of location and time
//!
//! The production implementation is [`SolarGrid`], an R-tree over provider
//! samples. [`UniformSolar`] and [`DiurnalSolar`] are synthetic fields for
//! tests and what-if runs where the provider only yields an area average.

mod grid;

pub use grid::{SolarGrid, SolarGridConfig};

use chrono::{DateTime, Timelike, Utc};
use geo::Point;

use crate::error::Error;

/// Irradiance sample from the solar data provider, keyed by location and
/// hour-of-day bucket. Read-only once ingested.
#[derive(Debug, Clone, Copy)]
pub struct SolarSample {
    /// Sample location (lon/lat)
    pub location: Point<f64>,
    /// Hour-of-day bucket, 0..24
    pub hour: u32,
    /// Global horizontal irradiance in W/m²
    pub irradiance: f64,
}

/// Maps a geographic point and time to expected irradiance in W/m².
///
/// Implementations are shared read-only between concurrent requests.
pub trait SolarExposure: Send + Sync {
    /// # Errors
    ///
    /// `DataUnavailable` when the point or time falls outside coverage;
    /// graph augmentation recovers with a zero-gain fallback.
    fn exposure(&self, point: Point<f64>, time: DateTime<Utc>) -> Result<f64, Error>;
}

/// Sinusoidal daylight curve: zero outside 06:00-18:00, peaking at noon.
pub fn diurnal_factor(hour: f64) -> f64 {
    if !(6.0..18.0).contains(&hour) {
        return 0.0;
    }
    ((hour - 6.0) / 12.0 * std::f64::consts::PI).sin()
}

/// Spatially and temporally constant irradiance field.
#[derive(Debug, Clone, Copy)]
pub struct UniformSolar {
    pub irradiance: f64,
}

impl UniformSolar {
    pub fn new(irradiance: f64) -> Self {
        Self { irradiance }
    }
}

impl SolarExposure for UniformSolar {
    fn exposure(&self, _point: Point<f64>, _time: DateTime<Utc>) -> Result<f64, Error> {
        Ok(self.irradiance)
    }
}

/// Spatially uniform field modulated by the daylight curve. Useful when
/// the provider only reports an annual average for the region.
#[derive(Debug, Clone, Copy)]
pub struct DiurnalSolar {
    /// Irradiance at solar noon in W/m²
    pub peak_irradiance: f64,
}

impl DiurnalSolar {
    pub fn new(peak_irradiance: f64) -> Self {
        Self { peak_irradiance }
    }
}

impl SolarExposure for DiurnalSolar {
    fn exposure(&self, _point: Point<f64>, time: DateTime<Utc>) -> Result<f64, Error> {
        let hour = f64::from(time.hour()) + f64::from(time.minute()) / 60.0;
        Ok(self.peak_irradiance * diurnal_factor(hour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn diurnal_curve_shape() {
        assert_eq!(diurnal_factor(0.0), 0.0);
        assert_eq!(diurnal_factor(5.9), 0.0);
        assert!((diurnal_factor(12.0) - 1.0).abs() < 1e-12);
        assert_eq!(diurnal_factor(18.0), 0.0);
        assert!(diurnal_factor(9.0) > 0.5);
    }

    #[test]
    fn diurnal_solar_peaks_at_noon() {
        let model = DiurnalSolar::new(800.0);
        let noon = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 6, 21, 2, 0, 0).unwrap();
        let origin = Point::new(0.0, 0.0);

        assert!((model.exposure(origin, noon).unwrap() - 800.0).abs() < 1e-9);
        assert_eq!(model.exposure(origin, night).unwrap(), 0.0);
    }
}
