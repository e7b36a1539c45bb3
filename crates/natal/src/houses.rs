//! House membership for a longitude given twelve Placidus cusps.

use crate::angle::normalize;
use crate::ephemeris::EphemerisError;
use serde::{Deserialize, Serialize};

/// The twelve cusp longitudes, house 1 first, each normalized to `[0, 360)`.
///
/// Cusps are not required to increase monotonically: the interval that
/// crosses 0° wraps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps([f64; 12]);

impl HouseCusps {
    pub fn new(cusps: [f64; 12]) -> Self {
        Self(cusps.map(normalize))
    }

    /// Accept provider output only if it holds exactly twelve finite values.
    pub fn from_slice(cusps: &[f64]) -> Result<Self, EphemerisError> {
        let array: [f64; 12] = cusps.try_into().map_err(|_| {
            EphemerisError::malformed(format!("expected 12 house cusps, got {}", cusps.len()))
        })?;
        if let Some(pos) = array.iter().position(|c| !c.is_finite()) {
            return Err(EphemerisError::malformed(format!(
                "house cusp {} is not a finite number",
                pos + 1
            )));
        }
        Ok(Self::new(array))
    }

    /// Longitude of cusp `house` (1..=12).
    pub fn cusp(&self, house: u8) -> f64 {
        self.0[(usize::from(house).clamp(1, 12)) - 1]
    }

    /// Whether `longitude` lies in the half-open arc `[cusp(house), cusp(house + 1))`.
    pub fn contains(&self, house: u8, longitude: f64) -> bool {
        let i = usize::from(house.clamp(1, 12)) - 1;
        let start = self.0[i];
        let end = self.0[(i + 1) % 12];
        let x = normalize(longitude);
        if start <= end {
            x >= start && x < end
        } else {
            x >= start || x < end
        }
    }

    /// Lowest-numbered house whose arc contains `longitude`.
    ///
    /// Degenerate cusp data (duplicates, a zero-width circle) can leave a
    /// point outside every arc. That case falls back to house 12 instead of
    /// failing; the chart still renders, but the placement is not guaranteed
    /// correct.
    pub fn house_of(&self, longitude: f64) -> u8 {
        match (1..=12u8).find(|&house| self.contains(house, longitude)) {
            Some(house) => house,
            None => {
                log::debug!(
                    "no house arc contains {:.4}°, falling back to house 12 (cusps {:?})",
                    longitude,
                    self.0
                );
                12
            }
        }
    }
}
