use crate::angle::{sign_of, to_dms, Sign};
use crate::aspects::AspectMatch;
use crate::body::Body;
use crate::motion::MotionState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPlacement {
    pub body: Body,
    /// Degrees, `[0, 360)`
    pub longitude: f64,
    pub sign: Sign,
    /// 1..=12
    pub house: u8,
    pub motion: MotionState,
    /// `D°MM'SS`
    pub degree: String,
}

/// A longitude with its derived sign and formatted degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub longitude: f64,
    pub sign: Sign,
    pub degree: String,
}

impl ChartPoint {
    /// `longitude` must already be normalized.
    pub fn at(longitude: f64) -> Self {
        Self {
            longitude,
            sign: sign_of(longitude),
            degree: to_dms(longitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCuspPlacement {
    pub house: u8,
    #[serde(flatten)]
    pub point: ChartPoint,
}

/// Display metadata for the report header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartHeader {
    pub name: String,
    pub sex: String,
    pub date: String,
    pub local_time: String,
    pub universal_time: String,
    pub place: String,
    pub sidereal_time: String,
}

/// A fully assembled chart. Built once by the assembler and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub header: ChartHeader,
    /// One per body, in body order
    pub planets: Vec<PlanetPlacement>,
    pub ascendant: ChartPoint,
    pub midheaven: ChartPoint,
    /// Cusps 1..=12 in order
    pub cusps: Vec<HouseCuspPlacement>,
    pub aspects: Vec<AspectMatch>,
}

impl ChartResult {
    pub fn planet(&self, body: Body) -> Option<&PlanetPlacement> {
        self.planets.iter().find(|p| p.body == body)
    }

    pub fn cusp(&self, house: u8) -> Option<&ChartPoint> {
        self.cusps.iter().find(|c| c.house == house).map(|c| &c.point)
    }

    /// Point opposite the Midheaven.
    pub fn imum_coeli(&self) -> ChartPoint {
        ChartPoint::at(crate::angle::normalize(self.midheaven.longitude + 180.0))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
