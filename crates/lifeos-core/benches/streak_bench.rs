//! # Streak Benchmarks
//!
//! Performance benchmarks for the streak calculator and the ledger.
//!
//! Run with: `cargo bench -p lifeos-core`

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lifeos_core::{HabitStreak, compute_streak, grant_experience};
use std::collections::BTreeSet;
use std::hint::black_box;

fn reference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).expect("date")
}

/// An unbroken run of `size` days ending today.
fn unbroken_run(size: u64) -> BTreeSet<NaiveDate> {
    (0..size).map(|n| reference_day() - Days::new(n)).collect()
}

/// Every other day for `size` days: the walk stops at the first gap.
fn alternating(size: u64) -> BTreeSet<NaiveDate> {
    (0..size)
        .step_by(2)
        .map(|n| reference_day() - Days::new(n))
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_compute_streak(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_streak");

    for size in [30u64, 365, 3650].iter() {
        let run = unbroken_run(*size);
        group.bench_with_input(BenchmarkId::new("unbroken", size), &run, |b, run| {
            b.iter(|| black_box(compute_streak(run, reference_day())));
        });

        let gaps = alternating(*size);
        group.bench_with_input(BenchmarkId::new("alternating", size), &gaps, |b, gaps| {
            b.iter(|| black_box(compute_streak(gaps, reference_day())));
        });
    }

    group.finish();
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("habit_recompute");

    for size in [30u64, 365, 3650].iter() {
        let run = unbroken_run(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &run, |b, run| {
            b.iter(|| black_box(HabitStreak::default().recompute(run, reference_day())));
        });
    }

    group.finish();
}

fn bench_grant(c: &mut Criterion) {
    c.bench_function("grant_experience", |b| {
        b.iter(|| black_box(grant_experience(black_box(12_345), 13, black_box(20))));
    });
}

criterion_group!(benches, bench_compute_streak, bench_recompute, bench_grant);
criterion_main!(benches);
