//! Criterion benchmarks for settings parsing and sample processing.
//!
//! Settings are parsed once per gesture, samples arrive once per touchpad
//! frame, so `process_sample` is the hot path.
//!
//! Run with:
//! ```bash
//! cargo bench --package keyscroll-core --bench scroll_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use keyscroll_core::{KeyMapper, ScrollAccumulator, ScrollSettings, ScrollVariant, Threshold};

const BENCH_SETTINGS: &[(ScrollVariant, &str)] = &[
    (ScrollVariant::Positional, "SPEED=5:Control+Up+Down"),
    (
        ScrollVariant::KeyChord,
        "SPEED=7:MOD=Control+Shift:UP=Prior:DOWN=Next:LEFT=Left:RIGHT=Right",
    ),
    (ScrollVariant::MouseWheel, "SPEED=3:INVERTED=true"),
];

const BENCH_KEY_NAMES: &[&str] = &[
    "a",
    "Up",
    "Page_Down",
    "F11",
    "Control_L",
    "XF86AudioRaiseVolume",
    "0x1008ff8b",
    "NoSuchKey",
];

fn bench_parse_settings(c: &mut Criterion) {
    let mut group = c.benchmark_group("settings");

    for (variant, input) in BENCH_SETTINGS {
        group.bench_with_input(
            BenchmarkId::new("parse", format!("{variant:?}")),
            input,
            |b, input| {
                b.iter(|| {
                    ScrollSettings::parse(*variant, variant.default_curve(), black_box(input))
                })
            },
        );
    }

    group.finish();
}

fn bench_keysym_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("keymap");

    group.bench_function("keysym_from_name_batch_8", |b| {
        b.iter(|| {
            BENCH_KEY_NAMES
                .iter()
                .map(|name| KeyMapper::keysym_from_name(black_box(name)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

fn bench_process_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulator");

    // A typical frame: a few units of motion, usually no tick.
    group.bench_function("small_delta", |b| {
        let mut acc = ScrollAccumulator::new(Threshold::DEFAULT, Threshold::DEFAULT);
        b.iter(|| acc.process_sample(black_box(1.5), black_box(-3.25), |d| {
            black_box(d);
        }))
    });

    // A fling: one frame crossing the threshold many times.
    group.bench_function("large_delta", |b| {
        let mut acc = ScrollAccumulator::new(Threshold::DEFAULT, Threshold::DEFAULT);
        b.iter(|| acc.process_sample(black_box(0.0), black_box(600.0), |d| {
            black_box(d);
        }))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_settings,
    bench_keysym_lookup,
    bench_process_sample,
);
criterion_main!(benches);
