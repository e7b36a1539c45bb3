//! Day-by-day search for a transiting body aspecting a natal longitude.

use crate::angle::{normalize, round_hundredths, separation};
use crate::aspects::AspectKind;
use crate::body::Body;
use crate::ephemeris::EphemerisProvider;
use crate::error::{ChartError, Stage};
use crate::time::midnight_ut;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRANSIT_ORB: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitQuery {
    pub body: Body,
    pub natal_longitude: f64,
    pub aspect: AspectKind,
    pub orb: f64,
    /// First day searched, inclusive
    pub start: NaiveDate,
    /// Last day searched, inclusive
    pub end: NaiveDate,
}

impl TransitQuery {
    /// Search every day of `year` with the default orb.
    pub fn for_year(body: Body, natal_longitude: f64, aspect: AspectKind, year: i32) -> Option<Self> {
        Some(Self {
            body,
            natal_longitude,
            aspect,
            orb: DEFAULT_TRANSIT_ORB,
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitHit {
    pub date: NaiveDate,
    pub transit_longitude: f64,
    pub natal_longitude: f64,
    /// Separation between the two longitudes, `[0, 180]`
    pub separation: f64,
}

/// Sample the transiting body at 00:00 UT each day and keep the days within orb.
pub fn find_transits<P>(provider: &P, query: &TransitQuery) -> Result<Vec<TransitHit>, ChartError>
where
    P: EphemerisProvider + ?Sized,
{
    let natal = normalize(query.natal_longitude);
    let mut hits = Vec::new();

    for date in query.start.iter_days().take_while(|d| *d <= query.end) {
        let jd = midnight_ut(date);
        let raw = provider
            .longitude(query.body, jd)
            .map_err(|e| ChartError::from_provider(e, Stage::Transit, Some(query.body), jd))?;
        let transit = normalize(raw);
        let sep = separation(transit, natal);
        if (sep - query.aspect.angle()).abs() <= query.orb {
            hits.push(TransitHit {
                date,
                transit_longitude: round_hundredths(transit),
                natal_longitude: round_hundredths(natal),
                separation: round_hundredths(sep),
            });
        }
    }

    log::debug!(
        "{} {} natal {:.2}°: {} days within {}° between {} and {}",
        query.body,
        query.aspect,
        natal,
        hits.len(),
        query.orb,
        query.start,
        query.end
    );
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::FixedEphemeris;

    #[test]
    fn finds_days_inside_the_orb() {
        let jan1 = midnight_ut(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        // Sun at 0° on Jan 1, one degree a day: square to 100° is exact on Jan 11
        let eph = FixedEphemeris::new(jan1).with_body(Body::Sun, 0.0, 1.0);
        let query = TransitQuery {
            body: Body::Sun,
            natal_longitude: 100.0,
            aspect: AspectKind::Square,
            orb: 1.5,
            start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        };
        let hits = find_transits(&eph, &query).unwrap();
        let days: Vec<u32> = hits.iter().map(|h| chrono::Datelike::day(&h.date)).collect();
        assert_eq!(days, vec![10, 11, 12]);
        assert_eq!(hits[1].separation, 90.0);
    }

    #[test]
    fn reversed_range_is_empty() {
        let eph = FixedEphemeris::new(midnight_ut(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()))
            .with_body(Body::Mars, 0.0, 0.5);
        let query = TransitQuery {
            body: Body::Mars,
            natal_longitude: 0.0,
            aspect: AspectKind::Conjunction,
            orb: 1.5,
            start: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        };
        assert!(find_transits(&eph, &query).unwrap().is_empty());
    }

    #[test]
    fn provider_failure_aborts_the_search() {
        let eph = FixedEphemeris::new(midnight_ut(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
        let query = TransitQuery::for_year(Body::Venus, 10.0, AspectKind::Trine, 2026).unwrap();
        let err = find_transits(&eph, &query).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Transit));
    }
}
