use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use volley_score::{
    Command, MatchEngine, MatchFormat, MatchState, Side,
    game::engine::{LoadState, SwapSides},
    snapshot::PersistedState,
};

/// Helper to create a match with `sets` finished sets and a set in progress
fn setup_match(sets: u8) -> MatchEngine {
    let mut engine = MatchEngine::new(MatchFormat::default());
    for i in 0..sets {
        let side = if i % 2 == 0 { Side::A } else { Side::B };
        for _ in 0..25 {
            engine.dispatch(Command::add_point(side)).unwrap();
        }
    }
    for i in 0..10 {
        let side = if i % 3 == 0 { Side::B } else { Side::A };
        engine.dispatch(Command::add_point(side)).unwrap();
    }
    engine
}

/// Benchmark a single rally on a fresh match
fn bench_add_point(c: &mut Criterion) {
    let state = MatchState::default();
    let command = Command::add_point(Side::B);

    c.bench_function("add_point", |b| {
        b.iter(|| state.reduce(&command));
    });
}

/// Benchmark playing out a whole best-of-five match
fn bench_full_match(c: &mut Criterion) {
    c.bench_function("full_match", |b| {
        b.iter(|| {
            let mut engine = MatchEngine::default();
            // Alternate rallies so every point is a side-out
            for _ in 0..3 {
                for i in 0..48 {
                    let side = if i % 2 == 0 { Side::A } else { Side::B };
                    let _ = engine.dispatch(Command::add_point(side));
                }
                for _ in 0..2 {
                    let _ = engine.dispatch(Command::add_point(Side::A));
                }
            }
            engine
        });
    });
}

/// Benchmark swapping sides with a growing set history
fn bench_swap_sides(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap_sides");

    for sets in [0u8, 2, 4].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{sets}_sets")),
            sets,
            |b, &n| {
                let engine = setup_match(n);
                let command: Command = SwapSides.into();
                b.iter(|| engine.state().reduce(&command));
            },
        );
    }

    group.finish();
}

/// Benchmark capturing and encoding the persisted record
fn bench_snapshot_capture(c: &mut Criterion) {
    let engine = setup_match(4);

    c.bench_function("snapshot_capture", |b| {
        b.iter(|| PersistedState::capture(engine.state(), 1_800).to_json());
    });
}

/// Benchmark decoding and restoring a saved match
fn bench_snapshot_restore(c: &mut Criterion) {
    let engine = setup_match(4);
    let json = PersistedState::capture(engine.state(), 1_800)
        .to_json()
        .unwrap();

    c.bench_function("snapshot_restore", |b| {
        b.iter_batched(
            MatchEngine::default,
            |mut engine| {
                let snapshot = PersistedState::from_json(&json);
                engine
                    .dispatch(
                        LoadState {
                            snapshot,
                            saved_format: None,
                        }
                        .into(),
                    )
                    .unwrap();
                engine
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    engine_operations,
    bench_add_point,
    bench_full_match,
    bench_swap_sides,
);

criterion_group!(persistence, bench_snapshot_capture, bench_snapshot_restore);

criterion_main!(engine_operations, persistence);
