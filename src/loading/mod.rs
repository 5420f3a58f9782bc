//! Ingestion of solar provider exports
//!
//! The solar data provider hands over irradiance samples keyed by location
//! and hour bucket; this module reads the CSV export format
//! (`lat,lon,hour,irradiance`) and builds the exposure grid. Downloading
//! and caching the upstream data is the provider's job, not the core's.

use std::path::Path;

use geo::Point;
use log::info;
use serde::Deserialize;

use crate::error::Error;
use crate::solar::{SolarGrid, SolarGridConfig, SolarSample};

#[derive(Debug, Deserialize)]
struct SolarSampleRecord {
    lat: f64,
    lon: f64,
    hour: u32,
    irradiance: f64,
}

/// Reads solar samples from a CSV export.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a record fails to parse.
pub fn read_solar_samples(path: &Path) -> Result<Vec<SolarSample>, Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut samples = Vec::new();
    for record in reader.deserialize() {
        let record: SolarSampleRecord = record?;
        samples.push(SolarSample {
            location: Point::new(record.lon, record.lat),
            hour: record.hour,
            irradiance: record.irradiance,
        });
    }

    info!("Read {} solar samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Reads a CSV export and builds the exposure grid in one go.
///
/// # Errors
///
/// Propagates read/parse errors and `InvalidData` for malformed samples.
pub fn solar_grid_from_csv(path: &Path, config: SolarGridConfig) -> Result<SolarGrid, Error> {
    SolarGrid::new(read_solar_samples(path)?, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_sample_records() {
        let mut path = std::env::temp_dir();
        path.push("sunroute_samples_test.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "lat,lon,hour,irradiance").unwrap();
        writeln!(file, "49.28,-123.12,12,615.5").unwrap();
        writeln!(file, "49.29,-123.10,13,580.0").unwrap();
        drop(file);

        let samples = read_solar_samples(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].hour, 12);
        assert!((samples[0].location.y() - 49.28).abs() < 1e-12);
        assert!((samples[0].location.x() + 123.12).abs() < 1e-12);
    }
}
