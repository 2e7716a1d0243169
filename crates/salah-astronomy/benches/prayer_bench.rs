use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use salah_astronomy::compute_times;
use salah_types::{CalculationConfig, GeoCoordinate, HighLatitudeRule, TimezoneOffset};

fn bench_compute_times(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let karachi = GeoCoordinate::new(24.8607, 67.0011).unwrap();
    let offset = TimezoneOffset::new(5.0).unwrap();
    let config = CalculationConfig::default();

    c.bench_function("compute_times_karachi", |b| {
        b.iter(|| compute_times(black_box(date), black_box(karachi), offset, &config))
    });

    let reykjavik = GeoCoordinate::new(64.1466, -21.9426).unwrap();
    let summer = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
    let angle_based = CalculationConfig::new().high_latitude(HighLatitudeRule::AngleBased);
    c.bench_function("compute_times_high_latitude", |b| {
        b.iter(|| {
            compute_times(black_box(summer), black_box(reykjavik), TimezoneOffset::UTC, &angle_based)
        })
    });
}

fn bench_year(c: &mut Criterion) {
    let coord = GeoCoordinate::new(21.4225, 39.8262).unwrap();
    let offset = TimezoneOffset::new(3.0).unwrap();
    let config = CalculationConfig::default();
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    c.bench_function("compute_times_full_year", |b| {
        b.iter(|| {
            start
                .iter_days()
                .take(365)
                .filter_map(|d| compute_times(d, coord, offset, &config).ok())
                .count()
        })
    });
}

criterion_group!(benches, bench_compute_times, bench_year);
criterion_main!(benches);
