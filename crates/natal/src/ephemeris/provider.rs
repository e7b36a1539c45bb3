use crate::body::Body;
use crate::ephemeris::types::{GeoLocation, HouseData};
use crate::time::JulianDay;
use thiserror::Error;

/// Failures reported by an ephemeris back end, before the engine adds context.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("{message}")]
    Unavailable { message: String },
    #[error("{message}")]
    Malformed { message: String },
}

impl EphemerisError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        EphemerisError::Unavailable {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        EphemerisError::Malformed {
            message: message.into(),
        }
    }
}

/// Source of raw ecliptic longitudes and Placidus house data.
///
/// Calls are blocking, side-effect free queries.
pub trait EphemerisProvider: Send + Sync {
    /// Ecliptic longitude of `body` in degrees. Need not be normalized.
    fn longitude(&self, body: Body, jd: JulianDay) -> Result<f64, EphemerisError>;

    /// Placidus cusps plus Ascendant and Midheaven.
    fn houses(&self, jd: JulianDay, location: GeoLocation) -> Result<HouseData, EphemerisError>;
}
