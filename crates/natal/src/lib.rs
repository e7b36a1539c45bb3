//! Natal chart engine.
//!
//! Pulls raw ecliptic longitudes and Placidus cusps from an [`EphemerisProvider`],
//! derives sign, house, motion and aspects for every body, and renders the
//! fixed-layout text report.

pub mod angle;
pub mod aspects;
pub mod body;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod motion;
pub mod report;
pub mod time;
pub mod transit;

pub use angle::{normalize, signed_diff, to_dms, Dms, Sign};
pub use aspects::{AspectFinder, AspectKind, AspectMatch, OrbTable};
pub use body::Body;
pub use chart::{ChartAssembler, ChartRequest, ChartResult, PlanetPlacement};
pub use ephemeris::{EphemerisError, EphemerisProvider, FixedEphemeris, GeoLocation, HouseData};
pub use error::{ChartError, Stage};
pub use houses::HouseCusps;
pub use motion::MotionState;
pub use report::{render, Variant};
pub use time::{BirthData, BirthInstant, JulianDay};

#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemerisAdapter;
