use crate::body::Body;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Major aspects, in catalogue (scan) order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
    Quincunx,
}

impl AspectKind {
    pub const ALL: [AspectKind; 6] = [
        AspectKind::Conjunction,
        AspectKind::Opposition,
        AspectKind::Trine,
        AspectKind::Square,
        AspectKind::Sextile,
        AspectKind::Quincunx,
    ];

    /// Exact separation in degrees.
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Opposition => 180.0,
            AspectKind::Trine => 120.0,
            AspectKind::Square => 90.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Quincunx => 150.0,
        }
    }

    /// Catalogue maximum orb in degrees.
    pub fn default_orb(self) -> f64 {
        match self {
            AspectKind::Conjunction => 8.0,
            AspectKind::Opposition => 8.0,
            AspectKind::Trine => 7.0,
            AspectKind::Square => 6.0,
            AspectKind::Sextile => 4.0,
            AspectKind::Quincunx => 3.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "Conjunction",
            AspectKind::Opposition => "Opposition",
            AspectKind::Trine => "Trine",
            AspectKind::Square => "Square",
            AspectKind::Sextile => "Sextile",
            AspectKind::Quincunx => "Quincunx",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        AspectKind::ALL
            .iter()
            .copied()
            .find(|k| k.name().to_lowercase() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = AspectKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown aspect '{s}'. Valid aspects: {valid:?}")
            })
    }
}

/// Maximum orb per aspect kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbTable([f64; 6]);

impl Default for OrbTable {
    fn default() -> Self {
        Self(AspectKind::ALL.map(AspectKind::default_orb))
    }
}

impl OrbTable {
    pub fn max_orb(&self, kind: AspectKind) -> f64 {
        self.0[kind.slot()]
    }

    /// Override one kind's orb. Negative or non-finite values are rejected.
    pub fn with_orb(mut self, kind: AspectKind, orb: f64) -> Result<Self, String> {
        if !orb.is_finite() || orb < 0.0 {
            return Err(format!("orb for {kind} must be a non-negative number, got {orb}"));
        }
        self.0[kind.slot()] = orb;
        Ok(self)
    }
}

/// A matched aspect. `first` always precedes `second` in body order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    pub first: Body,
    pub kind: AspectKind,
    pub second: Body,
    /// Deviation from the exact angle, rounded to 0.01°
    pub orb: f64,
}
