use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kundali::aspects::AspectCalculator;
use kundali::chart::assemble;
use kundali::ephemeris::ALL_BODIES;
use kundali::vedic::{compute_vimshottari_dasha, DashaLevel, DashaReference};
use kundali::Body;
use std::collections::BTreeMap;

fn sample_longitudes() -> BTreeMap<Body, f64> {
    ALL_BODIES
        .iter()
        .enumerate()
        .map(|(i, body)| (*body, (i as f64) * 29.7 + 3.1))
        .collect()
}

fn bench_assemble(c: &mut Criterion) {
    let longitudes = sample_longitudes();
    c.bench_function("assemble_rashi", |b| {
        b.iter(|| assemble(black_box(123.4), black_box(&longitudes), 1))
    });
    c.bench_function("assemble_navamsa", |b| {
        b.iter(|| assemble(black_box(123.4), black_box(&longitudes), 9))
    });
}

fn bench_aspects(c: &mut Criterion) {
    let calculator = AspectCalculator::new();
    let longitudes = sample_longitudes();
    c.bench_function("graha_drishti_map", |b| {
        b.iter(|| calculator.compute_map(black_box(&longitudes)))
    });
}

fn bench_dasha(c: &mut Criterion) {
    let birth = NaiveDate::from_ymd_opt(2003, 3, 13).unwrap();
    c.bench_function("vimshottari_mahadasha", |b| {
        b.iter(|| {
            compute_vimshottari_dasha(black_box(48.2), birth, DashaReference::Birth, DashaLevel::Mahadasha)
        })
    });
    c.bench_function("vimshottari_pratyantardasha", |b| {
        b.iter(|| {
            compute_vimshottari_dasha(
                black_box(48.2),
                birth,
                DashaReference::Birth,
                DashaLevel::Pratyantardasha,
            )
        })
    });
}

criterion_group!(benches, bench_assemble, bench_aspects, bench_dasha);
criterion_main!(benches);
