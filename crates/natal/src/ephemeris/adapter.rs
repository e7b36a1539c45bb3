use crate::body::Body;
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{GeoLocation, HouseData};
use crate::time::JulianDay;
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::{AscMc, Cusp};

/// FLG_SWIEPH | FLG_TRUEPOS
const CALC_FLAGS: i32 = 2 | 16;

/// Placidus is undefined once the ecliptic pole can reach the horizon.
const POLAR_LATITUDE_LIMIT: f64 = 66.5;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Swiss Ephemeris planet codes.
fn swiss_code(body: Body) -> u32 {
    match body {
        Body::Sun => 0,
        Body::Moon => 1,
        Body::Mercury => 2,
        Body::Venus => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
        Body::Uranus => 7,
        Body::Neptune => 8,
        Body::Pluto => 9,
        Body::TrueNode => 11,
    }
}

/// Swiss Ephemeris back end, Placidus houses only.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create an adapter reading data files from `ephemeris_path`, falling back
    /// to `SWISS_EPHEMERIS_PATH` and then the system install location.
    ///
    /// The path is handed to the Swiss Ephemeris library, whose data path is
    /// process-wide: the most recently constructed adapter wins.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = resolve_ephemeris_path(ephemeris_path)?;
        let path_str = path.to_str().ok_or_else(|| {
            EphemerisError::unavailable(format!(
                "ephemeris path {} is not valid UTF-8",
                path.display()
            ))
        })?;
        set_ephe_path(path_str);

        log::debug!("Swiss Ephemeris data at {}", path.display());
        Ok(Self { ephemeris_path: path })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

/// Explicit path, then `SWISS_EPHEMERIS_PATH`, then the system install
/// location. The chosen directory must exist.
fn resolve_ephemeris_path(explicit: Option<PathBuf>) -> Result<PathBuf, EphemerisError> {
    let path = explicit.unwrap_or_else(|| {
        env::var("SWISS_EPHEMERIS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
    });

    if !path.exists() {
        return Err(EphemerisError::unavailable(format!(
            "ephemeris path {} does not exist; install the Swiss Ephemeris data files",
            path.display()
        )));
    }
    Ok(path)
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn longitude(&self, body: Body, jd: JulianDay) -> Result<f64, EphemerisError> {
        let result = calc_ut(jd.value(), swiss_code(body), CALC_FLAGS as u32)
            .map_err(|e| EphemerisError::unavailable(format!("Swiss Ephemeris error: {e}")))?;
        let longitude = result.out[0];
        if !longitude.is_finite() {
            return Err(EphemerisError::malformed(format!(
                "non-finite longitude {longitude} for {body}"
            )));
        }
        Ok(longitude)
    }

    fn houses(&self, jd: JulianDay, location: GeoLocation) -> Result<HouseData, EphemerisError> {
        if location.lat.abs() >= POLAR_LATITUDE_LIMIT {
            return Err(EphemerisError::unavailable(format!(
                "Placidus houses are undefined at latitude {:.4}",
                location.lat
            )));
        }

        let (c, a) = houses_ex(jd.value(), CALC_FLAGS, location.lat, location.lon, b'P' as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        Ok(HouseData {
            cusps: vec![
                cusps.first,
                cusps.second,
                cusps.third,
                cusps.fourth,
                cusps.fifth,
                cusps.sixth,
                cusps.seventh,
                cusps.eighth,
                cusps.ninth,
                cusps.tenth,
                cusps.eleventh,
                cusps.twelfth,
            ],
            ascendant: ascmc.ascendant,
            midheaven: ascmc.mc,
        })
    }
}
