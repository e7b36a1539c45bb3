pub mod fixed;
pub mod provider;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod adapter;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use fixed::{FixedBody, FixedEphemeris};
pub use provider::{EphemerisError, EphemerisProvider};
pub use types::{GeoLocation, HouseData};
