//! Parsing of the loosely formatted values accepted on the command line.

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime, Timelike};

/// `DD/MM/YYYY`; `-` and `.` are accepted as separators too.
pub(crate) fn parse_date(text: &str) -> anyhow::Result<NaiveDate> {
    let normalized = text.trim().replace(['-', '.'], "/");
    NaiveDate::parse_from_str(&normalized, "%d/%m/%Y")
        .with_context(|| format!("invalid date '{text}' (expected DD/MM/YYYY)"))
}

/// `HH:MM`, seconds ignored when present.
pub(crate) fn parse_time(text: &str) -> anyhow::Result<(u32, u32)> {
    let trimmed = text.trim();
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .with_context(|| format!("invalid time '{text}' (expected HH:MM)"))?;
    Ok((time.hour(), time.minute()))
}

/// Map Portuguese and English synonyms onto `female`, `male` or `unknown`.
pub(crate) fn normalize_sex(label: &str) -> &'static str {
    match label.trim().to_lowercase().as_str() {
        "female" | "feminino" | "fêmea" | "mulher" | "woman" => "female",
        "male" | "masculino" | "macho" | "homem" | "man" => "male",
        _ => "unknown",
    }
}
