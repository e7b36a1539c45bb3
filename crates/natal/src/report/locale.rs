//! Label tables for the two report variants.

use crate::angle::Sign;
use crate::aspects::AspectKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// English labels throughout
    #[default]
    Generic,
    /// Sign names in Brazilian Portuguese
    PtBr,
}

const SIGNS_PT_BR: [&str; 12] = [
    "Áries",
    "Touro",
    "Gêmeos",
    "Câncer",
    "Leão",
    "Virgem",
    "Libra",
    "Escorpião",
    "Sagitário",
    "Capricórnio",
    "Aquário",
    "Peixes",
];

impl Variant {
    pub fn sign_label(self, sign: Sign) -> &'static str {
        match self {
            Variant::Generic => sign.name(),
            Variant::PtBr => SIGNS_PT_BR[sign.index()],
        }
    }

    pub fn aspect_label(self, kind: AspectKind) -> &'static str {
        match self {
            Variant::Generic => kind.name(),
            Variant::PtBr => match kind {
                AspectKind::Conjunction => "Conjunção",
                AspectKind::Opposition => "Oposição",
                AspectKind::Trine => "Trígono",
                AspectKind::Square => "Quadratura",
                AspectKind::Sextile => "Sextil",
                AspectKind::Quincunx => "Quincúncio",
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Generic => f.write_str("generic"),
            Variant::PtBr => f.write_str("pt_br"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "generic" | "en" => Ok(Variant::Generic),
            "pt_br" | "br" => Ok(Variant::PtBr),
            other => Err(format!("unknown report variant '{other}' (expected generic or pt_br)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_table_is_identity() {
        for sign in Sign::ALL {
            assert_eq!(Variant::Generic.sign_label(sign), sign.name());
        }
    }

    #[test]
    fn translated_table() {
        assert_eq!(Variant::PtBr.sign_label(Sign::Gemini), "Gêmeos");
        assert_eq!(Variant::PtBr.sign_label(Sign::Pisces), "Peixes");
        assert_eq!(Variant::PtBr.aspect_label(AspectKind::Square), "Quadratura");
    }

    #[test]
    fn parses_variant_names() {
        assert_eq!("pt-br".parse::<Variant>(), Ok(Variant::PtBr));
        assert_eq!("Generic".parse::<Variant>(), Ok(Variant::Generic));
        assert!("fr".parse::<Variant>().is_err());
    }
}
