use serde::{Deserialize, Serialize};

/// Geographic location coordinates in decimal degrees (east and north positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    /// `"lat, lon"` with four decimals, the place label used when no name is given.
    pub fn label(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Raw Placidus output as the provider returned it.
///
/// `cusps` is not trusted to hold twelve entries; the chart assembler checks
/// the cardinality before using it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseData {
    /// House cusps 1..12 in order, degrees
    pub cusps: Vec<f64>,
    pub ascendant: f64,
    pub midheaven: f64,
}
