mod input;

use anyhow::Context;
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use natal::chart::{ChartAssembler, ChartRequest};
use natal::ephemeris::{EphemerisProvider, FixedEphemeris, GeoLocation};
use natal::report::{aspect_summary, render, Variant};
use natal::transit::{find_transits, TransitQuery, DEFAULT_TRANSIT_ORB};
use natal::{AspectKind, BirthData, BirthInstant, Body};
use natal_config::NatalSettings;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Natal charts and transit searches")]
struct Cli {
    /// Config file (default: configs/natal.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON ephemeris table to use instead of the Swiss Ephemeris.
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a natal chart and print the report.
    Chart(ChartArgs),
    /// List the days a transiting body aspects a natal longitude.
    Transits(TransitArgs),
}

#[derive(Args, Debug)]
struct ChartArgs {
    #[arg(long)]
    name: String,

    /// Free text; Portuguese and English synonyms are normalized.
    #[arg(long, default_value = "unknown")]
    sex: String,

    /// Local birth date, DD/MM/YYYY.
    #[arg(long)]
    date: String,

    /// Local birth time, HH:MM.
    #[arg(long)]
    time: String,

    /// Hours east of UTC (e.g. -3 for Brasília).
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: f64,

    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Place shown in the header (default: the coordinates).
    #[arg(long)]
    place: Option<String>,

    /// Report labels: generic or pt-br (default from config).
    #[arg(long)]
    variant: Option<Variant>,

    /// Print the chart as JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Also print one summary line per aspect.
    #[arg(long)]
    summary: bool,
}

#[derive(Args, Debug)]
struct TransitArgs {
    #[arg(long)]
    body: Body,

    /// Natal longitude in degrees.
    #[arg(long, allow_hyphen_values = true)]
    natal_longitude: f64,

    #[arg(long)]
    aspect: AspectKind,

    #[arg(long, default_value_t = DEFAULT_TRANSIT_ORB)]
    orb: f64,

    /// Calendar year to search (default: the current year).
    #[arg(long)]
    year: Option<i32>,

    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let settings = natal_config::load_settings(cli.config.as_deref())?;
    log::debug!("settings: {:?}", settings);
    let provider = open_provider(cli.fixture.as_deref(), &settings)?;

    match cli.command {
        Command::Chart(args) => run_chart(args, provider, &settings).await,
        Command::Transits(args) => run_transits(args, provider.as_ref()),
    }
}

fn open_provider(
    fixture: Option<&Path>,
    settings: &NatalSettings,
) -> anyhow::Result<Arc<dyn EphemerisProvider>> {
    if let Some(path) = fixture {
        let table = FixedEphemeris::load(path)?;
        log::info!("using ephemeris fixture {}", path.display());
        return Ok(Arc::new(table));
    }
    swiss_provider(settings)
}

#[cfg(feature = "swisseph")]
fn swiss_provider(settings: &NatalSettings) -> anyhow::Result<Arc<dyn EphemerisProvider>> {
    let adapter = natal::SwissEphemerisAdapter::new(settings.ephemeris_path.clone())
        .context("Failed to open the Swiss Ephemeris")?;
    log::info!("using Swiss Ephemeris data in {}", adapter.ephemeris_path().display());
    Ok(Arc::new(adapter))
}

#[cfg(not(feature = "swisseph"))]
fn swiss_provider(_settings: &NatalSettings) -> anyhow::Result<Arc<dyn EphemerisProvider>> {
    anyhow::bail!("no ephemeris available: pass --fixture or build with the `swisseph` feature")
}

async fn run_chart(
    args: ChartArgs,
    provider: Arc<dyn EphemerisProvider>,
    settings: &NatalSettings,
) -> anyhow::Result<()> {
    let date = input::parse_date(&args.date)?;
    let (hour, minute) = input::parse_time(&args.time)?;
    let birth = BirthInstant::from_local(&BirthData {
        date,
        hour,
        minute,
        utc_offset_hours: args.utc_offset,
    })?;

    let request = ChartRequest {
        name: args.name,
        sex: input::normalize_sex(&args.sex).to_string(),
        birth,
        location: GeoLocation {
            lat: args.lat,
            lon: args.lon,
        },
        place: args.place,
    };

    let chart = ChartAssembler::with_orbs(settings.orbs)
        .compute_concurrent(provider, &request, settings.timeout)
        .await
        .context("Chart computation failed")?;

    if args.json {
        println!("{}", chart.to_json()?);
        return Ok(());
    }

    let variant = args.variant.unwrap_or(settings.variant);
    print!("{}", render(&chart, variant));
    if args.summary {
        println!();
        for line in aspect_summary(&chart, variant) {
            println!("{line}");
        }
    }
    Ok(())
}

fn run_transits(args: TransitArgs, provider: &dyn EphemerisProvider) -> anyhow::Result<()> {
    if !args.orb.is_finite() || args.orb < 0.0 {
        anyhow::bail!("--orb must be a non-negative number");
    }
    let year = args.year.unwrap_or_else(|| chrono::Utc::now().year());
    let mut query = TransitQuery::for_year(args.body, args.natal_longitude, args.aspect, year)
        .with_context(|| format!("year {year} is out of range"))?;
    query.orb = args.orb;

    let hits = find_transits(provider, &query).context("Transit search failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }
    if hits.is_empty() {
        println!(
            "No {} {} natal {:.2}° within {}° in {}",
            query.body, query.aspect, query.natal_longitude, query.orb, year
        );
        return Ok(());
    }
    for hit in hits {
        println!(
            "{}\t{}\t{:.2}\t{}\t{:.2}\tseparation {:.2}",
            hit.date, query.body, hit.transit_longitude, query.aspect, hit.natal_longitude, hit.separation
        );
    }
    Ok(())
}
