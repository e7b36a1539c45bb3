//! Angle arithmetic on the ecliptic circle.
//!
//! Every longitude handed to the rest of the engine goes through [`normalize`]
//! first, so downstream code can assume `[0, 360)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reduce any degree value into `[0, 360)`.
pub fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed rotation from `b` to `a`, in `(-180, 180]`.
pub fn signed_diff(a: f64, b: f64) -> f64 {
    let shifted = normalize(a - b + 180.0) - 180.0;
    if shifted <= -180.0 {
        180.0
    } else {
        shifted
    }
}

/// Unsigned angular separation in `[0, 180]`.
pub fn separation(a: f64, b: f64) -> f64 {
    signed_diff(a, b).abs()
}

/// Round to two decimals, the precision orbs and transit values are reported at.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Degree / minute / second split of an angle, rounded to the whole second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: i64,
    pub minutes: u8,
    pub seconds: u8,
}

impl Dms {
    pub fn from_degrees(angle: f64) -> Self {
        let mut degrees = angle.floor() as i64;
        let minutes_f = (angle - degrees as f64) * 60.0;
        let mut minutes = minutes_f.floor() as i64;
        let mut seconds = ((minutes_f - minutes as f64) * 60.0).round() as i64;

        if seconds >= 60 {
            seconds = 0;
            minutes += 1;
        }
        if minutes >= 60 {
            minutes = 0;
            degrees += 1;
        }

        Self {
            degrees,
            minutes: minutes as u8,
            seconds: seconds as u8,
        }
    }

    /// Decimal degrees represented by this split.
    pub fn to_degrees(self) -> f64 {
        self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds as f64 / 3600.0
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{:02}'{:02}", self.degrees, self.minutes, self.seconds)
    }
}

/// Format an angle as `D°MM'SS`.
pub fn to_dms(angle: f64) -> String {
    Dms::from_degrees(angle).to_string()
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Sign whose 30° band contains `longitude`.
    pub fn from_longitude(longitude: f64) -> Self {
        let index = (normalize(longitude) / 30.0).floor() as usize;
        Self::ALL[index % 12]
    }

    /// Position in the zodiac, Aries = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign `steps` positions further along the zodiac.
    pub fn offset(self, steps: usize) -> Self {
        Self::ALL[(self.index() + steps) % 12]
    }

    pub fn opposite(self) -> Self {
        self.offset(6)
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn sign_of(longitude: f64) -> Sign {
    Sign::from_longitude(longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_stays_in_range() {
        for &x in &[-720.5, -360.0, -0.0001, -1e-15, 0.0, 359.999, 360.0, 725.25] {
            let n = normalize(x);
            assert!((0.0..360.0).contains(&n), "normalize({x}) = {n}");
        }
        assert_eq!(normalize(-30.0), 330.0);
        assert_eq!(normalize(390.0), 30.0);
    }

    #[test]
    fn normalize_is_periodic() {
        for k in -3..=3 {
            let shifted = normalize(123.456 + 360.0 * k as f64);
            assert!((shifted - 123.456).abs() < 1e-9);
        }
    }

    #[test]
    fn signed_diff_range_and_identity() {
        assert_eq!(signed_diff(42.0, 42.0), 0.0);
        assert_eq!(signed_diff(10.0, 350.0), 20.0);
        assert_eq!(signed_diff(350.0, 10.0), -20.0);
        // exact opposition lands on the closed end
        assert_eq!(signed_diff(0.0, 180.0), 180.0);
        assert_eq!(signed_diff(180.0, 0.0), 180.0);
        for a in (0..360).step_by(17) {
            for b in (0..360).step_by(23) {
                let d = signed_diff(a as f64, b as f64);
                assert!(d > -180.0 && d <= 180.0, "signed_diff({a}, {b}) = {d}");
            }
        }
    }

    #[test]
    fn dms_formats_and_carries() {
        assert_eq!(to_dms(0.0), "0°00'00");
        assert_eq!(to_dms(123.456), "123°27'22");
        // 29.9999999° rounds its seconds up to 60 and must carry twice
        assert_eq!(to_dms(29.999_999_9), "30°00'00");
        assert_eq!(to_dms(10.5), "10°30'00");
    }

    #[test]
    fn dms_round_trips_within_an_arcsecond() {
        let mut x = 0.0;
        while x < 360.0 {
            let dms = Dms::from_degrees(x);
            assert!(dms.minutes < 60 && dms.seconds < 60);
            assert!((dms.to_degrees() - x).abs() < 1.0 / 3600.0, "{x} -> {dms}");
            x += 0.987_654_321;
        }
    }

    #[test]
    fn sign_lookup() {
        assert_eq!(sign_of(0.0), Sign::Aries);
        assert_eq!(sign_of(29.999), Sign::Aries);
        assert_eq!(sign_of(30.0), Sign::Taurus);
        assert_eq!(sign_of(359.9), Sign::Pisces);
        assert_eq!(sign_of(-15.0), Sign::Pisces);
        assert_eq!(Sign::Aries.opposite(), Sign::Libra);
        assert_eq!(Sign::Virgo.offset(6), Sign::Pisces);
    }
}
