use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bodies placed in a chart. Declaration order is table row order and the
/// aspect scan order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    TrueNode,
}

impl Body {
    pub const ALL: [Body; 11] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::TrueNode,
    ];

    /// Label used in reports.
    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::TrueNode => "True Node",
        }
    }

    /// Identifier used on the command line and in fixture files.
    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::TrueNode => "true_node",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBody(pub String);

impl fmt::Display for UnknownBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid: Vec<&str> = Body::ALL.iter().map(|b| b.id()).collect();
        write!(f, "unknown body '{}'. Valid bodies: {:?}", self.0, valid)
    }
}

impl std::error::Error for UnknownBody {}

impl FromStr for Body {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        // "north_node" is the same point under its other common name
        let wanted = if wanted == "north_node" { "true_node".to_string() } else { wanted };
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.id() == wanted)
            .ok_or_else(|| UnknownBody(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_names_and_ids() {
        assert_eq!("Sun".parse::<Body>(), Ok(Body::Sun));
        assert_eq!("true node".parse::<Body>(), Ok(Body::TrueNode));
        assert_eq!("north_node".parse::<Body>(), Ok(Body::TrueNode));
        assert!("chiron".parse::<Body>().is_err());
    }

    #[test]
    fn order_is_fixed() {
        assert_eq!(Body::ALL.first(), Some(&Body::Sun));
        assert_eq!(Body::ALL.last(), Some(&Body::TrueNode));
        assert!(Body::ALL.windows(2).all(|w| w[0] < w[1]));
    }
}
