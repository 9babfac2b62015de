use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use blockfall::core::{Field, GameConfig, MovementManager, PhysicalInteractor, ShapeRegistry};
use blockfall::types::{Intent, RotationDirection};

fn manager() -> MovementManager {
    MovementManager::new(&GameConfig::default(), Arc::new(ShapeRegistry::with_presets()))
        .expect("default session")
}

fn bench_step(c: &mut Criterion) {
    let mut session = manager();

    c.bench_function("step", |b| {
        b.iter(|| {
            if session.is_over() {
                session = manager();
            }
            black_box(session.tick());
        })
    });
}

fn bench_clear_rows(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter_batched(
            || {
                let mut field = Field::new(10, 20);
                let bottom = (16..20).flat_map(|row| (0..10).map(move |col| (row, col)));
                field.lock(bottom, 1).expect("empty field");
                field
            },
            |mut field| black_box(field.remove_completed_rows()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_spawn(c: &mut Criterion) {
    let registry = Arc::new(ShapeRegistry::with_presets());
    let config = GameConfig::default();

    c.bench_function("spawn", |b| {
        b.iter_batched(
            || PhysicalInteractor::new(&config, registry.clone()).expect("default session"),
            |mut interactor| black_box(interactor.spawn()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut session = manager();
    let mut right = true;

    c.bench_function("try_move", |b| {
        b.iter(|| {
            let intent = if right { Intent::MoveRight } else { Intent::MoveLeft };
            if !session.apply(black_box(intent)) {
                right = !right;
            }
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut session = manager();

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            black_box(
                session
                    .interactor_mut()
                    .try_rotate(black_box(RotationDirection::Clockwise)),
            );
        })
    });
}

criterion_group!(
    benches,
    bench_step,
    bench_clear_rows,
    bench_spawn,
    bench_try_move,
    bench_try_rotate
);
criterion_main!(benches);
