use crate::body::Body;
use crate::ephemeris::EphemerisError;
use crate::time::JulianDay;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Step of chart computation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Longitude,
    MotionProbe,
    Houses,
    Transit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Longitude => "longitude lookup",
            Stage::MotionProbe => "motion probe",
            Stage::Houses => "house calculation",
            Stage::Transit => "transit search",
        };
        f.write_str(label)
    }
}

/// Errors surfaced by chart computation. Partial charts are never returned.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("ephemeris unavailable during {stage}{} at JD {jd}: {message}", for_body(.body))]
    EphemerisUnavailable {
        stage: Stage,
        body: Option<Body>,
        jd: f64,
        message: String,
    },
    #[error("malformed ephemeris response during {stage}: {message}")]
    MalformedEphemerisResponse { stage: Stage, message: String },
    #[error("ephemeris call timed out after {after:?} during {stage}{}", for_body(.body))]
    Timeout {
        stage: Stage,
        body: Option<Body>,
        after: Duration,
    },
    #[error("invalid birth data: {message}")]
    InvalidBirthData { message: String },
}

impl ChartError {
    /// Attach stage, body and instant to a provider failure.
    pub fn from_provider(err: EphemerisError, stage: Stage, body: Option<Body>, jd: JulianDay) -> Self {
        match err {
            EphemerisError::Unavailable { message } => ChartError::EphemerisUnavailable {
                stage,
                body,
                jd: jd.value(),
                message,
            },
            EphemerisError::Malformed { message } => {
                ChartError::MalformedEphemerisResponse { stage, message }
            }
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            ChartError::EphemerisUnavailable { stage, .. }
            | ChartError::MalformedEphemerisResponse { stage, .. }
            | ChartError::Timeout { stage, .. } => Some(*stage),
            ChartError::InvalidBirthData { .. } => None,
        }
    }
}

fn for_body(body: &Option<Body>) -> String {
    match body {
        Some(b) => format!(" for {}", b),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = ChartError::from_provider(
            EphemerisError::Unavailable {
                message: "out of range".to_string(),
            },
            Stage::MotionProbe,
            Some(Body::Pluto),
            JulianDay::new(2_447_007.5),
        );
        let text = err.to_string();
        assert!(text.contains("motion probe"));
        assert!(text.contains("for Pluto"));
        assert!(text.contains("2447007.5"));
        assert_eq!(err.stage(), Some(Stage::MotionProbe));
    }

    #[test]
    fn malformed_maps_to_its_own_kind() {
        let err = ChartError::from_provider(
            EphemerisError::Malformed {
                message: "11 cusps".to_string(),
            },
            Stage::Houses,
            None,
            JulianDay::new(0.0),
        );
        assert!(matches!(err, ChartError::MalformedEphemerisResponse { stage: Stage::Houses, .. }));
    }
}
