pub mod assembler;
pub mod data;
pub mod snapshot;

pub use assembler::{ChartAssembler, ChartRequest};
pub use data::{ChartHeader, ChartPoint, ChartResult, HouseCuspPlacement, PlanetPlacement};
pub use snapshot::{gather, gather_concurrent, BodySample, EphemerisSnapshot};
