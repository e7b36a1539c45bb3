use crate::angle::{normalize, sign_of, to_dms};
use crate::aspects::{AspectFinder, OrbTable};
use crate::body::Body;
use crate::chart::data::{ChartHeader, ChartPoint, ChartResult, HouseCuspPlacement, PlanetPlacement};
use crate::chart::snapshot::{gather, gather_concurrent, EphemerisSnapshot};
use crate::ephemeris::{EphemerisProvider, GeoLocation};
use crate::error::{ChartError, Stage};
use crate::houses::HouseCusps;
use crate::time::BirthInstant;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Everything the engine needs for one chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartRequest {
    pub name: String,
    /// Free-text label, shown as given
    pub sex: String,
    pub birth: BirthInstant,
    pub location: GeoLocation,
    /// Display place; `"lat, lon"` is used when absent or blank
    pub place: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ChartAssembler {
    finder: AspectFinder,
}

impl ChartAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orbs(orbs: OrbTable) -> Self {
        Self {
            finder: AspectFinder::with_orbs(orbs),
        }
    }

    /// Gather on the calling thread and assemble.
    pub fn compute<P>(&self, provider: &P, request: &ChartRequest) -> Result<ChartResult, ChartError>
    where
        P: EphemerisProvider + ?Sized,
    {
        let snapshot = gather(provider, request.birth.julian_day(), request.location)?;
        self.assemble(request, &snapshot)
    }

    /// Gather with concurrent, time-bounded provider calls and assemble.
    pub async fn compute_concurrent<P>(
        &self,
        provider: Arc<P>,
        request: &ChartRequest,
        timeout: Duration,
    ) -> Result<ChartResult, ChartError>
    where
        P: EphemerisProvider + ?Sized + 'static,
    {
        let snapshot =
            gather_concurrent(provider, request.birth.julian_day(), request.location, timeout).await?;
        self.assemble(request, &snapshot)
    }

    /// Derive every placement, cusp and aspect from gathered data.
    pub fn assemble(
        &self,
        request: &ChartRequest,
        snapshot: &EphemerisSnapshot,
    ) -> Result<ChartResult, ChartError> {
        let jd = snapshot.jd;
        let cusps = HouseCusps::from_slice(&snapshot.houses.cusps)
            .map_err(|e| ChartError::from_provider(e, Stage::Houses, None, jd))?;
        let ascendant = finite_angle(snapshot.houses.ascendant, "ascendant")?;
        let midheaven = finite_angle(snapshot.houses.midheaven, "midheaven")?;

        if snapshot.bodies.len() != Body::ALL.len() {
            return Err(ChartError::MalformedEphemerisResponse {
                stage: Stage::Longitude,
                message: format!(
                    "expected {} body samples, got {}",
                    Body::ALL.len(),
                    snapshot.bodies.len()
                ),
            });
        }

        let mut planets = Vec::with_capacity(snapshot.bodies.len());
        for sample in &snapshot.bodies {
            if !sample.longitude.is_finite() {
                return Err(ChartError::MalformedEphemerisResponse {
                    stage: Stage::Longitude,
                    message: format!("non-finite longitude for {}", sample.body),
                });
            }
            let longitude = normalize(sample.longitude);
            let placement = PlanetPlacement {
                body: sample.body,
                longitude,
                sign: sign_of(longitude),
                house: cusps.house_of(longitude),
                motion: sample.motion,
                degree: to_dms(longitude),
            };
            log::debug!(
                "{}: {} {} house {} {}",
                placement.body,
                placement.sign,
                placement.degree,
                placement.house,
                placement.motion
            );
            planets.push(placement);
        }

        let positions: Vec<(Body, f64)> = planets.iter().map(|p| (p.body, p.longitude)).collect();
        let aspects = self.finder.find(&positions);

        let cusp_points = (1..=12u8)
            .map(|house| HouseCuspPlacement {
                house,
                point: ChartPoint::at(cusps.cusp(house)),
            })
            .collect();

        let place = match request.place.as_deref().map(str::trim) {
            Some(place) if !place.is_empty() => place.to_string(),
            _ => request.location.label(),
        };

        let header = ChartHeader {
            name: request.name.clone(),
            sex: request.sex.clone(),
            date: request.birth.date_label(),
            local_time: request.birth.local_time_label(),
            universal_time: request.birth.universal_time_label(),
            place,
            sidereal_time: request.birth.sidereal_time_label(),
        };

        log::info!(
            "assembled chart for {} at JD {:.5}: {} aspects",
            header.name,
            jd.value(),
            aspects.len()
        );

        Ok(ChartResult {
            header,
            planets,
            ascendant: ChartPoint::at(ascendant),
            midheaven: ChartPoint::at(midheaven),
            cusps: cusp_points,
            aspects,
        })
    }
}

fn finite_angle(value: f64, what: &str) -> Result<f64, ChartError> {
    if value.is_finite() {
        Ok(normalize(value))
    } else {
        Err(ChartError::MalformedEphemerisResponse {
            stage: Stage::Houses,
            message: format!("{what} is not a finite number"),
        })
    }
}
