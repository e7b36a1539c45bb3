//! Deterministic table-driven provider.
//!
//! Each body moves linearly from its longitude at `epoch` at a constant daily
//! rate, which is enough for fixtures, replays and benchmarks. House data is
//! returned as stored regardless of location.

use crate::angle::normalize;
use crate::body::Body;
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{GeoLocation, HouseData};
use crate::time::JulianDay;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedBody {
    /// Longitude at the table epoch, degrees
    pub longitude: f64,
    /// Degrees per day, negative while retrograde
    #[serde(default)]
    pub daily_motion: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedEphemeris {
    pub epoch: JulianDay,
    #[serde(default)]
    pub bodies: BTreeMap<Body, FixedBody>,
    pub houses: Option<HouseData>,
}

impl FixedEphemeris {
    pub fn new(epoch: JulianDay) -> Self {
        Self {
            epoch,
            bodies: BTreeMap::new(),
            houses: None,
        }
    }

    pub fn with_body(mut self, body: Body, longitude: f64, daily_motion: f64) -> Self {
        self.bodies.insert(
            body,
            FixedBody {
                longitude,
                daily_motion,
            },
        );
        self
    }

    pub fn with_houses(mut self, cusps: Vec<f64>, ascendant: f64, midheaven: f64) -> Self {
        self.houses = Some(HouseData {
            cusps,
            ascendant,
            midheaven,
        });
        self
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, EphemerisError> {
        let text = fs::read_to_string(path).map_err(|e| {
            EphemerisError::unavailable(format!("cannot read fixture {}: {e}", path.display()))
        })?;
        Self::from_json(&text).map_err(|e| {
            EphemerisError::malformed(format!("cannot parse fixture {}: {e}", path.display()))
        })
    }
}

impl EphemerisProvider for FixedEphemeris {
    fn longitude(&self, body: Body, jd: JulianDay) -> Result<f64, EphemerisError> {
        let entry = self
            .bodies
            .get(&body)
            .ok_or_else(|| EphemerisError::unavailable(format!("no table entry for {body}")))?;
        let elapsed = jd.value() - self.epoch.value();
        Ok(normalize(entry.longitude + entry.daily_motion * elapsed))
    }

    fn houses(&self, _jd: JulianDay, _location: GeoLocation) -> Result<HouseData, EphemerisError> {
        self.houses
            .clone()
            .ok_or_else(|| EphemerisError::unavailable("table carries no house data"))
    }
}
