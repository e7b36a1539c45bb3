//! Direct / retrograde / stationary classification by a central difference
//! of longitude. No retrograde flag or speed from upstream is consulted.

use crate::angle::signed_diff;
use crate::body::Body;
use crate::ephemeris::EphemerisProvider;
use crate::error::{ChartError, Stage};
use crate::time::JulianDay;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-width of the probe window: samples are taken 12 h either side.
pub const PROBE_HALF_WINDOW_DAYS: f64 = 0.5;

/// Net motion below this many degrees across the window counts as stationary (~0.36″).
pub const STATIONARY_EPSILON_DEG: f64 = 1e-4;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionState {
    Direct,
    Retrograde,
    Stationary,
}

impl MotionState {
    pub fn label(self) -> &'static str {
        match self {
            MotionState::Direct => "direct",
            MotionState::Retrograde => "retrograde",
            MotionState::Stationary => "stationary",
        }
    }

    /// Classify a signed change of longitude across the probe window.
    pub fn from_delta(delta: f64) -> Self {
        if delta > STATIONARY_EPSILON_DEG {
            MotionState::Direct
        } else if delta < -STATIONARY_EPSILON_DEG {
            MotionState::Retrograde
        } else {
            MotionState::Stationary
        }
    }

    /// Classify from the longitudes sampled before and after the instant.
    pub fn from_samples(before: f64, after: f64) -> Self {
        Self::from_delta(signed_diff(after, before))
    }
}

impl fmt::Display for MotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Instants at which the two probe samples are taken.
pub fn probe_instants(jd: JulianDay) -> (JulianDay, JulianDay) {
    (
        jd.offset_days(-PROBE_HALF_WINDOW_DAYS),
        jd.offset_days(PROBE_HALF_WINDOW_DAYS),
    )
}

/// Probe the provider around `jd` and classify the motion of `body`.
pub fn classify<P>(provider: &P, body: Body, jd: JulianDay) -> Result<MotionState, ChartError>
where
    P: EphemerisProvider + ?Sized,
{
    let (t_before, t_after) = probe_instants(jd);
    let before = provider
        .longitude(body, t_before)
        .map_err(|e| ChartError::from_provider(e, Stage::MotionProbe, Some(body), t_before))?;
    let after = provider
        .longitude(body, t_after)
        .map_err(|e| ChartError::from_provider(e, Stage::MotionProbe, Some(body), t_after))?;
    Ok(MotionState::from_samples(before, after))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::FixedEphemeris;

    fn provider(daily_motion: f64) -> FixedEphemeris {
        Body::ALL
            .iter()
            .fold(FixedEphemeris::new(JulianDay::new(2_447_000.0)), |eph, &body| {
                eph.with_body(body, 359.9, daily_motion)
            })
    }

    #[test]
    fn increasing_longitude_is_direct() {
        let eph = provider(1.0);
        for body in Body::ALL {
            let state = classify(&eph, body, JulianDay::new(2_447_000.0)).unwrap();
            assert_eq!(state, MotionState::Direct, "{body}");
        }
    }

    #[test]
    fn decreasing_longitude_is_retrograde() {
        let eph = provider(-0.02);
        for body in Body::ALL {
            let state = classify(&eph, body, JulianDay::new(2_447_000.0)).unwrap();
            assert_eq!(state, MotionState::Retrograde, "{body}");
        }
    }

    #[test]
    fn constant_longitude_is_stationary() {
        let eph = provider(0.0);
        for body in Body::ALL {
            let state = classify(&eph, body, JulianDay::new(2_447_000.0)).unwrap();
            assert_eq!(state, MotionState::Stationary, "{body}");
        }
    }

    #[test]
    fn slow_outer_planet_is_not_stationary() {
        // Pluto at ~0.004°/day still clears the threshold comfortably
        assert_eq!(MotionState::from_samples(10.0, 10.004), MotionState::Direct);
        assert_eq!(MotionState::from_delta(5e-5), MotionState::Stationary);
    }

    #[test]
    fn wrap_across_zero_keeps_direction() {
        assert_eq!(MotionState::from_samples(359.8, 0.3), MotionState::Direct);
        assert_eq!(MotionState::from_samples(0.3, 359.8), MotionState::Retrograde);
    }

    #[test]
    fn probe_failure_names_the_stage() {
        let eph = FixedEphemeris::new(JulianDay::new(0.0));
        let err = classify(&eph, Body::Mars, JulianDay::new(0.0)).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::MotionProbe));
    }
}
