//! Raw ephemeris data for one chart instant.
//!
//! Gathering is the only step that talks to the provider; everything after it
//! is pure. The sequential and concurrent gatherers produce the same snapshot.

use crate::body::Body;
use crate::ephemeris::{EphemerisError, EphemerisProvider, GeoLocation, HouseData};
use crate::error::{ChartError, Stage};
use crate::motion::{self, probe_instants, MotionState};
use crate::time::JulianDay;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Timeout;

#[derive(Debug, Clone, PartialEq)]
pub struct BodySample {
    pub body: Body,
    /// Raw provider longitude, not yet normalized
    pub longitude: f64,
    pub motion: MotionState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisSnapshot {
    pub jd: JulianDay,
    /// One per body, in body order
    pub bodies: Vec<BodySample>,
    pub houses: HouseData,
}

/// Query the provider body by body on the calling thread.
pub fn gather<P>(provider: &P, jd: JulianDay, location: GeoLocation) -> Result<EphemerisSnapshot, ChartError>
where
    P: EphemerisProvider + ?Sized,
{
    let mut bodies = Vec::with_capacity(Body::ALL.len());
    for body in Body::ALL {
        let longitude = provider
            .longitude(body, jd)
            .map_err(|e| ChartError::from_provider(e, Stage::Longitude, Some(body), jd))?;
        let motion = motion::classify(provider, body, jd)?;
        bodies.push(BodySample {
            body,
            longitude,
            motion,
        });
    }

    let houses = provider
        .houses(jd, location)
        .map_err(|e| ChartError::from_provider(e, Stage::Houses, None, jd))?;

    Ok(EphemerisSnapshot { jd, bodies, houses })
}

type Pending<T> = Timeout<JoinHandle<Result<T, EphemerisError>>>;

struct Lookup {
    body: Body,
    stage: Stage,
    at: JulianDay,
    pending: Pending<f64>,
}

/// Run every provider query on the blocking pool at once, each bounded by
/// `timeout`. Any failure or timeout fails the whole snapshot.
pub async fn gather_concurrent<P>(
    provider: Arc<P>,
    jd: JulianDay,
    location: GeoLocation,
    timeout: Duration,
) -> Result<EphemerisSnapshot, ChartError>
where
    P: EphemerisProvider + ?Sized + 'static,
{
    let (t_before, t_after) = probe_instants(jd);

    let mut lookups = Vec::with_capacity(Body::ALL.len() * 3);
    for body in Body::ALL {
        for (stage, at) in [
            (Stage::Longitude, jd),
            (Stage::MotionProbe, t_before),
            (Stage::MotionProbe, t_after),
        ] {
            let provider = Arc::clone(&provider);
            let handle = tokio::task::spawn_blocking(move || provider.longitude(body, at));
            lookups.push(Lookup {
                body,
                stage,
                at,
                pending: tokio::time::timeout(timeout, handle),
            });
        }
    }

    let houses_pending = {
        let provider = Arc::clone(&provider);
        let handle = tokio::task::spawn_blocking(move || provider.houses(jd, location));
        tokio::time::timeout(timeout, handle)
    };

    let mut values = Vec::with_capacity(lookups.len());
    for lookup in lookups {
        let value = settle(lookup.pending, timeout, lookup.stage, Some(lookup.body), lookup.at).await?;
        values.push(value);
    }
    let houses = settle(houses_pending, timeout, Stage::Houses, None, jd).await?;

    let bodies = Body::ALL
        .iter()
        .zip(values.chunks_exact(3))
        .map(|(&body, samples)| BodySample {
            body,
            longitude: samples[0],
            motion: MotionState::from_samples(samples[1], samples[2]),
        })
        .collect();

    Ok(EphemerisSnapshot { jd, bodies, houses })
}

async fn settle<T>(
    pending: Pending<T>,
    timeout: Duration,
    stage: Stage,
    body: Option<Body>,
    at: JulianDay,
) -> Result<T, ChartError> {
    match pending.await {
        Err(_) => {
            log::warn!(
                "ephemeris call timed out after {:?} during {}{}",
                timeout,
                stage,
                body.map(|b| format!(" for {b}")).unwrap_or_default()
            );
            Err(ChartError::Timeout {
                stage,
                body,
                after: timeout,
            })
        }
        Ok(Err(join_error)) => Err(ChartError::EphemerisUnavailable {
            stage,
            body,
            jd: at.value(),
            message: format!("ephemeris task failed: {join_error}"),
        }),
        Ok(Ok(result)) => result.map_err(|e| ChartError::from_provider(e, stage, body, at)),
    }
}
