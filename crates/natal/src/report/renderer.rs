//! Fixed-layout text report.
//!
//! Sections, in order: header, planetary positions, houses, and the aspect
//! table when there is at least one aspect. Output always ends in exactly one
//! newline.

use crate::chart::{ChartPoint, ChartResult};
use crate::report::locale::Variant;

const TITLE: &str = "Astrological Data used for Personal Portrait Short Horoscope";
const PLANETS_TRAILER: &str = "Planets at the end of a house are interpreted in the next house.";
const ASPECTS_TRAILER: &str = "Numbers indicate orb (deviation from the exact aspect angle).";

pub fn render(chart: &ChartResult, variant: Variant) -> String {
    let mut lines = Vec::new();
    push_header(&mut lines, chart);
    push_planets(&mut lines, chart, variant);
    push_houses(&mut lines, chart, variant);
    push_aspects(&mut lines, chart);

    let mut text = lines.join("\n");
    text.truncate(text.trim_end().len());
    text.push('\n');
    text
}

fn push_header(lines: &mut Vec<String>, chart: &ChartResult) {
    let h = &chart.header;
    lines.push(TITLE.to_string());
    lines.push(format!("for {} ({})", h.name, h.sex));
    lines.push(format!(
        "born on {}\tlocal time:\t{}\tU.T.:\t{}",
        h.date, h.local_time, h.universal_time
    ));
    lines.push(format!("in {}\tsid. time:\t{}", h.place, h.sidereal_time));
    lines.push(String::new());
}

fn push_planets(lines: &mut Vec<String>, chart: &ChartResult, variant: Variant) {
    lines.push("Planetary positions".to_string());
    lines.push("planet\tsign\tdegree\t\tmotion".to_string());
    for p in &chart.planets {
        lines.push(format!(
            "{}\t{}\t{}\tin house {}\t{}",
            p.body,
            variant.sign_label(p.sign),
            p.degree,
            p.house,
            p.motion
        ));
    }
    lines.push(PLANETS_TRAILER.to_string());
}

fn push_houses(lines: &mut Vec<String>, chart: &ChartResult, variant: Variant) {
    let row = |label: &str, point: &ChartPoint| {
        format!("{}\t{}\t{}", label, variant.sign_label(point.sign), point.degree)
    };
    let cusp_row = |label: &str, house: u8| match chart.cusp(house) {
        Some(point) => row(label, point),
        None => format!("{label}\t-\t-"),
    };

    lines.push(String::new());
    lines.push("House positions (Placidus)".to_string());
    lines.push(row("Ascendant", &chart.ascendant));
    lines.push(cusp_row("2nd House", 2));
    lines.push(cusp_row("3rd House", 3));
    lines.push(row("Imum Coeli", &chart.imum_coeli()));
    lines.push(cusp_row("5th House", 5));
    lines.push(cusp_row("6th House", 6));

    // sign is always opposite the Ascendant's sign; degree comes from cusp 7
    let descendant_degree = chart.cusp(7).map(|c| c.degree.as_str()).unwrap_or("-");
    lines.push(format!(
        "Descendant\t{}\t{}",
        variant.sign_label(chart.ascendant.sign.opposite()),
        descendant_degree
    ));

    lines.push(cusp_row("8th House", 8));
    lines.push(cusp_row("9th House", 9));
    lines.push(row("Medium Coeli", &chart.midheaven));
    lines.push(cusp_row("11th House", 11));
    lines.push(cusp_row("12th House", 12));
}

fn push_aspects(lines: &mut Vec<String>, chart: &ChartResult) {
    if chart.aspects.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push("Major aspects".to_string());
    for a in &chart.aspects {
        lines.push(format!("{}\t{}\t{}\t{:.2}°", a.first, a.kind, a.second, a.orb));
    }
    lines.push(ASPECTS_TRAILER.to_string());
}

/// One line per aspect, `A Kind B orb°`, with aspect names in the variant's language.
pub fn aspect_summary(chart: &ChartResult, variant: Variant) -> Vec<String> {
    chart
        .aspects
        .iter()
        .map(|a| {
            format!(
                "{} {} {} {:.2}°",
                a.first,
                variant.aspect_label(a.kind),
                a.second,
                a.orb
            )
        })
        .collect()
}
