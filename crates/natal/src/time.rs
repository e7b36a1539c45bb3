//! Birth instants, Julian days and the time strings shown in the report header.
//!
//! All computation runs on UT. The local offset is carried only so the header
//! can show the wall-clock time the chart was requested for.

use crate::error::ChartError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Julian day of the Unix epoch (1970-01-01T00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian day of J2000.0 (2000-01-01T12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

const SECONDS_PER_DAY: f64 = 86_400.0;
const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Continuous day count on the UT scale, the ephemeris provider's native unit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianDay(f64);

impl JulianDay {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let seconds = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9;
        Self(seconds / SECONDS_PER_DAY + UNIX_EPOCH_JD)
    }

    pub fn offset_days(self, days: f64) -> Self {
        Self(self.0 + days)
    }
}

/// Local birth date and wall-clock time with its UTC offset in hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthData {
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
    pub utc_offset_hours: f64,
}

/// A birth moment normalized to UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthInstant {
    local: NaiveDateTime,
    utc: DateTime<Utc>,
    utc_offset_hours: f64,
}

impl BirthInstant {
    /// Convert local wall-clock time to UTC by subtracting the offset.
    pub fn from_local(data: &BirthData) -> Result<Self, ChartError> {
        let time = NaiveTime::from_hms_opt(data.hour, data.minute, 0).ok_or_else(|| {
            ChartError::InvalidBirthData {
                message: format!("time {:02}:{:02} does not exist", data.hour, data.minute),
            }
        })?;
        if !data.utc_offset_hours.is_finite() || data.utc_offset_hours.abs() > 18.0 {
            return Err(ChartError::InvalidBirthData {
                message: format!("UTC offset {} is outside ±18 hours", data.utc_offset_hours),
            });
        }

        let local = data.date.and_time(time);
        let offset = Duration::seconds((data.utc_offset_hours * 3600.0).round() as i64);
        let utc = Utc.from_utc_datetime(&(local - offset));

        Ok(Self {
            local,
            utc,
            utc_offset_hours: data.utc_offset_hours,
        })
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn utc_offset_hours(&self) -> f64 {
        self.utc_offset_hours
    }

    pub fn julian_day(&self) -> JulianDay {
        JulianDay::from_datetime(self.utc)
    }

    /// Local birth date, e.g. `30 Jul 1987`.
    pub fn date_label(&self) -> String {
        format_date(self.local.date())
    }

    /// Local wall-clock time, `HH:MM`.
    pub fn local_time_label(&self) -> String {
        self.local.format("%H:%M").to_string()
    }

    /// UT clock time rounded to the minute, `HH:MM`.
    pub fn universal_time_label(&self) -> String {
        (self.utc + Duration::seconds(30)).format("%H:%M").to_string()
    }

    /// Greenwich mean sidereal time of the instant, `HH:MM:SS`.
    pub fn sidereal_time_label(&self) -> String {
        format_sidereal_hours(gmst_hours(self.julian_day()))
    }
}

pub fn format_date(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{:02} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

/// Earth Rotation Angle in radians, IERS Conventions 2010 eq. 5.15.
fn earth_rotation_angle_rad(jd: JulianDay) -> f64 {
    let du = jd.value() - J2000_JD;
    let theta = TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du);
    theta.rem_euclid(TAU)
}

/// Greenwich mean sidereal time in hours `[0, 24)`, Capitaine et al. 2003.
pub fn gmst_hours(jd: JulianDay) -> f64 {
    let t = (jd.value() - J2000_JD) / 36525.0;
    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t.powi(2)
        - 0.00000044 * t.powi(3)
        - 0.000029956 * t.powi(4)
        - 0.0000000368 * t.powi(5);
    let gmst = (earth_rotation_angle_rad(jd) + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU);
    let hours = gmst.to_degrees() / 15.0;
    if hours >= 24.0 {
        0.0
    } else {
        hours
    }
}

/// `HH:MM:SS` with second rounding carried into minutes and hours; hours wrap at 24.
pub fn format_sidereal_hours(hours: f64) -> String {
    let mut h = hours.floor() as i64;
    let minutes_f = (hours - h as f64) * 60.0;
    let mut m = minutes_f.floor() as i64;
    let mut s = ((minutes_f - m as f64) * 60.0).round() as i64;
    if s >= 60 {
        s = 0;
        m += 1;
    }
    if m >= 60 {
        m = 0;
        h = (h + 1) % 24;
    }
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Midnight UT at the start of `date`.
pub fn midnight_ut(date: NaiveDate) -> JulianDay {
    JulianDay::from_datetime(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn mafra_birth() -> BirthData {
        BirthData {
            date: NaiveDate::from_ymd_opt(1987, 7, 30).unwrap(),
            hour: 19,
            minute: 5,
            utc_offset_hours: -3.0,
        }
    }

    #[test]
    fn local_to_utc_subtracts_offset() {
        let instant = BirthInstant::from_local(&mafra_birth()).unwrap();
        assert_eq!((instant.utc().hour(), instant.utc().minute()), (22, 5));
        assert_eq!(instant.local_time_label(), "19:05");
        assert_eq!(instant.universal_time_label(), "22:05");
        assert_eq!(instant.date_label(), "30 Jul 1987");
    }

    #[test]
    fn utc_crossing_midnight_moves_the_date() {
        let data = BirthData {
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            hour: 23,
            minute: 30,
            utc_offset_hours: -5.5,
        };
        let instant = BirthInstant::from_local(&data).unwrap();
        assert_eq!(instant.utc().date_naive(), NaiveDate::from_ymd_opt(2000, 1, 2).unwrap());
        assert_eq!(instant.universal_time_label(), "05:00");
        // the header still shows the local date
        assert_eq!(instant.date_label(), "01 Jan 2000");
    }

    #[test]
    fn rejects_nonexistent_time() {
        let mut data = mafra_birth();
        data.hour = 24;
        assert!(matches!(
            BirthInstant::from_local(&data),
            Err(ChartError::InvalidBirthData { .. })
        ));
    }

    #[test]
    fn julian_day_matches_known_epochs() {
        let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((JulianDay::from_datetime(j2000).value() - J2000_JD).abs() < 1e-9);
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(JulianDay::from_datetime(epoch).value(), UNIX_EPOCH_JD);
    }

    #[test]
    fn rejects_offsets_beyond_eighteen_hours() {
        for offset in [18.5, -19.0, f64::NAN, f64::INFINITY, 1e300] {
            let mut data = mafra_birth();
            data.utc_offset_hours = offset;
            assert!(
                matches!(BirthInstant::from_local(&data), Err(ChartError::InvalidBirthData { .. })),
                "offset {offset}"
            );
        }
    }

    #[test]
    fn gmst_at_j2000_midnight() {
        // 2000-01-01 0h UT: GMST ≈ 6h39m52s
        let hours = gmst_hours(JulianDay::new(2_451_544.5));
        assert!((hours - 6.6645).abs() < 0.01, "GMST = {hours}");
        assert_eq!(format_sidereal_hours(hours)[..5].to_string(), "06:39");
    }

    #[test]
    fn sidereal_format_carries_and_wraps() {
        assert_eq!(format_sidereal_hours(23.999_999_9), "00:00:00");
        assert_eq!(format_sidereal_hours(1.5), "01:30:00");
    }

    #[test]
    fn sidereal_label_depends_only_on_instant() {
        let a = BirthInstant::from_local(&mafra_birth()).unwrap();
        let b = BirthInstant::from_local(&mafra_birth()).unwrap();
        assert_eq!(a.sidereal_time_label(), b.sidereal_time_label());
    }
}
