use anyhow::Context;
use natal::{AspectKind, OrbTable, Variant};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Paths tried, in order, when no explicit config path is given.
pub const SEARCH_PATHS: [&str; 2] = ["configs/natal.toml", "../../configs/natal.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct NatalSettings {
    /// Swiss Ephemeris data directory, if configured
    pub ephemeris_path: Option<PathBuf>,
    /// Per-call bound for concurrent ephemeris queries
    pub timeout: Duration,
    pub variant: Variant,
    pub orbs: OrbTable,
}

impl Default for NatalSettings {
    fn default() -> Self {
        Self {
            ephemeris_path: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            variant: Variant::default(),
            orbs: OrbTable::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ReportToml {
    #[serde(default)]
    variant: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrbsToml {
    conjunction: Option<f64>,
    opposition: Option<f64>,
    trine: Option<f64>,
    square: Option<f64>,
    sextile: Option<f64>,
    quincunx: Option<f64>,
}

impl OrbsToml {
    fn overrides(&self) -> [(AspectKind, Option<f64>); 6] {
        [
            (AspectKind::Conjunction, self.conjunction),
            (AspectKind::Opposition, self.opposition),
            (AspectKind::Trine, self.trine),
            (AspectKind::Square, self.square),
            (AspectKind::Sextile, self.sextile),
            (AspectKind::Quincunx, self.quincunx),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
    #[serde(default)]
    report: ReportToml,
    #[serde(default)]
    orbs: OrbsToml,
}

/// Read the config text, trying the explicit path first and the usual
/// relative locations otherwise. `Ok(None)` when no file exists.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<String>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        return Ok(Some(text));
    }
    let candidates: Vec<PathBuf> = SEARCH_PATHS.iter().map(PathBuf::from).collect();
    read_first_present(&candidates)
}

/// Text of the first file in `candidates` that exists. Only a missing file
/// moves on to the next candidate; any other read failure is returned.
fn read_first_present(candidates: &[PathBuf]) -> anyhow::Result<Option<String>> {
    for p in candidates {
        match fs::read_to_string(p) {
            Ok(text) => return Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Could not read config file {}", p.display()))
            }
        }
    }
    Ok(None)
}

pub fn parse_settings(text: &str) -> anyhow::Result<NatalSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse natal.toml: {e}"))?;

    let mut settings = NatalSettings::default();

    if let Some(eph) = root.ephemeris {
        if eph.timeout_ms == 0 {
            anyhow::bail!("ephemeris.timeout_ms must be greater than zero");
        }
        settings.ephemeris_path = eph.path;
        settings.timeout = Duration::from_millis(eph.timeout_ms);
    }

    if let Some(variant) = root.report.variant {
        settings.variant = variant
            .parse()
            .map_err(|e| anyhow::anyhow!("report.variant: {e}"))?;
    }

    for (kind, orb) in root.orbs.overrides() {
        if let Some(orb) = orb {
            settings.orbs = settings
                .orbs
                .with_orb(kind, orb)
                .map_err(|e| anyhow::anyhow!("[orbs] {e}"))?;
        }
    }

    Ok(settings)
}

/// Load settings; a missing file yields defaults, a broken one is an error.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<NatalSettings> {
    match read_config_text(explicit)? {
        Some(text) => parse_settings(&text),
        None => Ok(NatalSettings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_text_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, NatalSettings::default());
        assert_eq!(settings.timeout, Duration::from_millis(5000));
    }

    #[test]
    fn reads_every_section() {
        let text = r#"
            [ephemeris]
            path = "/opt/ephe"
            timeout_ms = 250

            [report]
            variant = "pt_br"

            [orbs]
            conjunction = 10.0
            quincunx = 2.0
        "#;
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.ephemeris_path, Some(PathBuf::from("/opt/ephe")));
        assert_eq!(settings.timeout, Duration::from_millis(250));
        assert_eq!(settings.variant, Variant::PtBr);
        assert_eq!(settings.orbs.max_orb(AspectKind::Conjunction), 10.0);
        assert_eq!(settings.orbs.max_orb(AspectKind::Quincunx), 2.0);
        assert_eq!(settings.orbs.max_orb(AspectKind::Trine), 7.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_settings("[orbs]\nsquare = -1.0").is_err());
        assert!(parse_settings("[orbs]\nsemisquare = 2.0").is_err());
        assert!(parse_settings("[report]\nvariant = \"klingon\"").is_err());
        assert!(parse_settings("[ephemeris]\ntimeout_ms = 0").is_err());
        assert!(parse_settings("not toml at all [").is_err());
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report]\nvariant = \"pt-br\"").unwrap();
        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.variant, Variant::PtBr);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configs/natal.toml");
        let settings = load_settings(Some(&path)).unwrap();
        assert_eq!(settings, NatalSettings::default());
    }

    #[test]
    fn unreadable_search_path_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("configs")).unwrap();
        let broken = dir.path().join("configs").join("natal.toml");
        fs::write(&broken, b"[report]\nvariant = \"pt_br\"\n\xff\n").unwrap();
        let fallback = dir.path().join("fallback.toml");
        fs::write(&fallback, "[report]\nvariant = \"generic\"\n").unwrap();

        let err = read_first_present(&[broken, fallback]).unwrap_err();
        assert!(err.to_string().contains("natal.toml"), "{err}");
    }

    #[test]
    fn directory_in_search_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let as_dir = dir.path().join("natal.toml");
        fs::create_dir(&as_dir).unwrap();
        assert!(read_first_present(&[as_dir]).is_err());
    }

    #[test]
    fn absent_search_paths_give_none() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = [dir.path().join("a.toml"), dir.path().join("b.toml")];
        assert!(read_first_present(&candidates).unwrap().is_none());

        fs::write(&candidates[1], "[ephemeris]\ntimeout_ms = 10\n").unwrap();
        let text = read_first_present(&candidates).unwrap().unwrap();
        assert_eq!(parse_settings(&text).unwrap().timeout, Duration::from_millis(10));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(load_settings(Some(&missing)).is_err());
    }
}
