use crate::angle::{round_hundredths, separation};
use crate::aspects::types::{AspectKind, AspectMatch, OrbTable};
use crate::body::Body;

/// Scans body pairs for major aspects.
///
/// Every kind whose orb window contains the separation is reported; near a
/// shared boundary one pair can match two kinds and both are kept.
#[derive(Debug, Clone, Default)]
pub struct AspectFinder {
    orbs: OrbTable,
}

impl AspectFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orbs(orbs: OrbTable) -> Self {
        Self { orbs }
    }

    pub fn orbs(&self) -> &OrbTable {
        &self.orbs
    }

    /// Aspect kinds matched by two longitudes, with unrounded orbs.
    ///
    /// Both the raw orb and the orb as reported (rounded to 0.01°) must stay
    /// within the kind's maximum.
    pub fn match_longitudes(&self, lon_a: f64, lon_b: f64) -> Vec<(AspectKind, f64)> {
        let diff = separation(lon_a, lon_b);
        AspectKind::ALL
            .iter()
            .filter_map(|&kind| {
                let orb = (diff - kind.angle()).abs();
                let max = self.orbs.max_orb(kind);
                (orb <= max && round_hundredths(orb) <= max).then_some((kind, orb))
            })
            .collect()
    }

    /// All aspects among `positions`, taken in the order given.
    ///
    /// Pairs are visited `(i, j)` with `i < j`, so callers passing bodies in
    /// [`Body::ALL`] order get each pair once with the earlier body first.
    pub fn find(&self, positions: &[(Body, f64)]) -> Vec<AspectMatch> {
        let mut matches = Vec::new();
        for (i, &(first, lon_a)) in positions.iter().enumerate() {
            for &(second, lon_b) in &positions[i + 1..] {
                for (kind, orb) in self.match_longitudes(lon_a, lon_b) {
                    matches.push(AspectMatch {
                        first,
                        kind,
                        second,
                        orb: round_hundredths(orb),
                    });
                }
            }
        }
        matches
    }
}
