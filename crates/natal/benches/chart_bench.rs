use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use natal::chart::{ChartAssembler, ChartRequest};
use natal::ephemeris::{FixedEphemeris, GeoLocation};
use natal::report::{render, Variant};
use natal::{BirthData, BirthInstant, Body};

fn setup() -> (FixedEphemeris, ChartRequest) {
    let birth = BirthInstant::from_local(&BirthData {
        date: NaiveDate::from_ymd_opt(1987, 7, 30).unwrap(),
        hour: 19,
        minute: 5,
        utc_offset_hours: -3.0,
    })
    .unwrap();

    let mut eph = FixedEphemeris::new(birth.julian_day());
    for (i, body) in Body::ALL.iter().enumerate() {
        eph = eph.with_body(*body, (i as f64) * 33.3, 1.0 - i as f64 * 0.15);
    }
    let cusps: Vec<f64> = (0..12).map(|i| 300.0 + 30.0 * i as f64).collect();
    let eph = eph.with_houses(cusps, 300.0, 210.0);

    let request = ChartRequest {
        name: "Bench".to_string(),
        sex: "unknown".to_string(),
        birth,
        location: GeoLocation {
            lat: -26.1114,
            lon: -49.8052,
        },
        place: None,
    };
    (eph, request)
}

fn bench_compute(c: &mut Criterion) {
    let (eph, request) = setup();
    let assembler = ChartAssembler::new();

    c.bench_function("compute_chart", |b| {
        b.iter(|| assembler.compute(black_box(&eph), black_box(&request)))
    });
}

fn bench_render(c: &mut Criterion) {
    let (eph, request) = setup();
    let chart = match ChartAssembler::new().compute(&eph, &request) {
        Ok(chart) => chart,
        Err(e) => panic!("bench chart failed: {e}"),
    };

    c.bench_function("render_report", |b| {
        b.iter(|| render(black_box(&chart), Variant::Generic))
    });
}

criterion_group!(benches, bench_compute, bench_render);
criterion_main!(benches);
