//! Spatially indexed irradiance samples with inverse-distance interpolation

use chrono::{DateTime, Timelike, Utc};
use geo::{Distance, Haversine, Point};
use hashbrown::HashMap;
use log::info;
use rstar::RTree;
use rstar::primitives::GeomWithData;
use serde::{Deserialize, Serialize};

use super::{SolarExposure, SolarSample};
use crate::error::Error;

type IndexedSample = GeomWithData<[f64; 2], f64>;

/// Lookup tunables for [`SolarGrid`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolarGridConfig {
    /// Samples farther than this many meters from the query point are
    /// ignored; a query with no sample in range is a coverage miss.
    pub max_sample_distance: f64,
    /// Number of nearest samples blended per query.
    pub neighbors: usize,
}

impl Default for SolarGridConfig {
    fn default() -> Self {
        Self {
            max_sample_distance: 5_000.0,
            neighbors: 4,
        }
    }
}

/// Provider samples bucketed by hour of day, each bucket indexed in an
/// R-tree for nearest-neighbor lookup. Exposure queries blend the nearest
/// in-range samples with inverse-distance weights.
pub struct SolarGrid {
    hours: HashMap<u32, RTree<IndexedSample>>,
    config: SolarGridConfig,
}

impl SolarGrid {
    /// # Errors
    ///
    /// Returns `InvalidData` on an empty sample set, an out-of-range hour
    /// bucket, or a zero-neighbor config.
    pub fn new(samples: Vec<SolarSample>, config: SolarGridConfig) -> Result<Self, Error> {
        if samples.is_empty() {
            return Err(Error::InvalidData("no solar samples provided".to_string()));
        }
        if config.neighbors == 0 {
            return Err(Error::InvalidData(
                "SolarGridConfig.neighbors must be at least 1".to_string(),
            ));
        }

        let total = samples.len();
        let mut buckets: HashMap<u32, Vec<IndexedSample>> = HashMap::new();
        for sample in samples {
            if sample.hour >= 24 {
                return Err(Error::InvalidData(format!(
                    "solar sample hour {} outside 0..24",
                    sample.hour
                )));
            }
            buckets.entry(sample.hour).or_default().push(IndexedSample::new(
                [sample.location.x(), sample.location.y()],
                sample.irradiance,
            ));
        }

        let hours: HashMap<u32, RTree<IndexedSample>> = buckets
            .into_iter()
            .map(|(hour, entries)| (hour, RTree::bulk_load(entries)))
            .collect();

        info!(
            "Solar grid built: {total} samples across {} hour buckets",
            hours.len()
        );

        Ok(Self { hours, config })
    }
}

impl SolarExposure for SolarGrid {
    fn exposure(&self, point: Point<f64>, time: DateTime<Utc>) -> Result<f64, Error> {
        let tree = self.hours.get(&time.hour()).ok_or(Error::DataUnavailable)?;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for sample in tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(self.config.neighbors)
        {
            let location = Point::new(sample.geom()[0], sample.geom()[1]);
            let distance = Haversine.distance(point, location);
            if distance > self.config.max_sample_distance {
                // Iteration is nearest-first; everything beyond is farther.
                break;
            }
            if distance < 1.0 {
                return Ok(sample.data);
            }
            numerator += sample.data / distance;
            denominator += 1.0 / distance;
        }

        if denominator == 0.0 {
            return Err(Error::DataUnavailable);
        }
        Ok(numerator / denominator)
    }
}
