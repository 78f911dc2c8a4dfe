//! Criterion benchmarks for the event-interpretation hot path.
//!
//! Every device report passes through either the key-state machine or the
//! jog accumulator before anything reaches the host, so both must stay far
//! below the device's report interval (about 1 ms).
//!
//! Run with:
//! ```bash
//! cargo bench --package jogkey-core --bench engine_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jogkey_core::keymap::x11;
use jogkey_core::{JogMode, Key, Keystroke, Profile};

// ── Representative inputs ─────────────────────────────────────────────────────

/// A press/release cycle over bound, LED and unbound keys.
const SNAPSHOT_CYCLE: &[&[Key]] = &[
    &[Key::Cut],
    &[],
    &[Key::In, Key::Snap],
    &[Key::Snap],
    &[],
    &[Key::Cam4, Key::Timeline],
    &[],
];

/// Wheel readings mixing small nudges, large flicks and a clear.
const JOG_INPUTS: &[&str] = &["12", "-7", "5000", "40", "-4100", "clear", "3"];

// ── Benchmarks: key-state machine ─────────────────────────────────────────────

fn bench_key_snapshots(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_state");

    for name in ["jianying", "demo"] {
        let profile = Profile::by_name(name).expect("built-in profile");
        group.bench_with_input(BenchmarkId::new("snapshot_cycle_7", name), &profile, |b, p| {
            let (mut keys, mut jog) = p.state_machines();
            b.iter(|| {
                for snapshot in SNAPSHOT_CYCLE {
                    black_box(keys.on_key_snapshot(snapshot.iter().copied(), &mut jog));
                }
            })
        });
    }

    group.finish();
}

// ── Benchmarks: jog accumulator ───────────────────────────────────────────────

fn bench_jog(c: &mut Criterion) {
    let mut group = c.benchmark_group("jog");
    let profile = Profile::jianying().expect("built-in profile");

    group.bench_function("on_jog_single", |b| {
        let (_, mut jog) = profile.state_machines();
        b.iter(|| jog.on_jog(JogMode::Relative2, black_box("42")))
    });

    group.bench_function("on_jog_batch_7", |b| {
        let (_, mut jog) = profile.state_machines();
        b.iter(|| {
            JOG_INPUTS
                .iter()
                .map(|input| jog.on_jog(JogMode::Relative2, black_box(input)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

// ── Benchmarks: keystroke rendering ───────────────────────────────────────────

fn bench_chord(c: &mut Criterion) {
    let mut group = c.benchmark_group("keystroke");
    let keystroke: Keystroke = "ctrl+shift+f".parse().expect("valid chord");

    group.bench_function("parse_chord", |b| {
        b.iter(|| black_box("ctrl+shift+f").parse::<Keystroke>())
    });
    group.bench_function("x11_chord", |b| b.iter(|| x11::chord(black_box(&keystroke))));

    group.finish();
}

criterion_group!(benches, bench_key_snapshots, bench_jog, bench_chord);
criterion_main!(benches);
