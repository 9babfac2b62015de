//! Property tests for placement legality, rotation and row clearing

use std::sync::Arc;

use proptest::prelude::*;

use blockfall::core::{
    Field, Figure, FigureBuilder, GameConfig, MovementManager, PhysicalInteractor, ShapeRegistry,
};
use blockfall::types::{Intent, RotationDirection};

const W: usize = 10;
const H: usize = 20;

fn field_from(bits: &[bool]) -> Field {
    let mut field = Field::new(W as u16, H as u16);
    let cells = bits
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b)
        .map(|(i, _)| ((i / W) as i16, (i % W) as i16));
    field.lock(cells, 1).unwrap();
    field
}

fn figure(shape: usize, orientation: usize, anchor: (i16, i16)) -> Figure {
    let registry = Arc::new(ShapeRegistry::with_presets());
    let shape = registry.by_index(shape).unwrap().clone();
    let mut builder = FigureBuilder::new(registry, &GameConfig::default()).unwrap();
    builder.set_state(
        shape.id().clone(),
        orientation % shape.orientation_count(),
        anchor,
    );
    builder.get_result().unwrap()
}

proptest! {
    #[test]
    fn prop_try_move_accepts_exactly_legal_targets(
        bits in prop::collection::vec(prop::bool::weighted(0.3), W * H),
        shape in 0usize..7,
        orientation in 0usize..4,
        row in -2i16..22,
        col in -2i16..12,
        dr in -1i16..=2,
        dc in -2i16..=2,
    ) {
        let field = field_from(&bits);
        let mut fig = figure(shape, orientation, (row, col));
        let orientation = fig.orientation();
        let target = (row + dr, col + dc);
        let legal = fig
            .cells_at(target, orientation)
            .all(|(r, c)| field.in_bounds(r, c) && field.get(r, c) == Some(None));

        let moved = PhysicalInteractor::try_move_figure(&mut fig, &field, dr, dc);
        prop_assert_eq!(moved, legal);
        prop_assert_eq!(fig.anchor(), if legal { target } else { (row, col) });
        prop_assert_eq!(fig.orientation(), orientation);
    }

    #[test]
    fn prop_direct_rotation_accepts_exactly_legal_targets(
        bits in prop::collection::vec(prop::bool::weighted(0.3), W * H),
        shape in 0usize..7,
        orientation in 0usize..4,
        row in 0i16..20,
        col in 0i16..10,
        clockwise in any::<bool>(),
    ) {
        let field = field_from(&bits);
        let mut fig = figure(shape, orientation, (row, col));
        let orientation = fig.orientation();
        let direction = if clockwise {
            RotationDirection::Clockwise
        } else {
            RotationDirection::CounterClockwise
        };
        let next = fig.rotate(direction);
        let legal = field.fits(fig.cells_at((row, col), next));

        let rotated = PhysicalInteractor::try_rotate_figure(&mut fig, &field, direction, false);
        prop_assert_eq!(rotated, legal);
        prop_assert_eq!(fig.orientation(), if legal { next } else { orientation });
        prop_assert_eq!(fig.anchor(), (row, col));
    }

    #[test]
    fn prop_kicked_rotation_always_lands_on_free_cells(
        bits in prop::collection::vec(prop::bool::weighted(0.3), W * H),
        shape in 0usize..7,
        orientation in 0usize..4,
        row in 0i16..20,
        col in 0i16..10,
    ) {
        let field = field_from(&bits);
        let mut fig = figure(shape, orientation, (row, col));
        let orientation = fig.orientation();
        if PhysicalInteractor::try_rotate_figure(&mut fig, &field, RotationDirection::Clockwise, true) {
            prop_assert!(field.fits(fig.cells()));
        } else {
            prop_assert_eq!(fig.anchor(), (row, col));
            prop_assert_eq!(fig.orientation(), orientation);
        }
    }

    #[test]
    fn prop_rotation_is_cyclic(shape in 0usize..7, orientation in 0usize..4) {
        let fig = figure(shape, orientation, (5, 5));
        prop_assert!(fig.orientation() < fig.orientation_count());
        let count = fig.orientation_count();
        let mut o = fig.orientation();
        for _ in 0..count {
            o = RotationDirection::Clockwise.apply(o, count);
        }
        prop_assert_eq!(o, fig.orientation());
    }

    #[test]
    fn prop_clear_removes_only_full_rows(
        bits in prop::collection::vec(prop::bool::weighted(0.8), W * H),
    ) {
        let mut field = field_from(&bits);
        let before = field.to_rows();
        let full = "#".repeat(W);
        let kept: Vec<&String> = before.iter().filter(|row| **row != full).collect();

        let cleared = field.clear_completed_rows();
        prop_assert_eq!(cleared, H - kept.len());

        let after = field.to_rows();
        let empty = ".".repeat(W);
        for row in &after[..cleared] {
            prop_assert_eq!(row, &empty);
        }
        for (got, want) in after[cleared..].iter().zip(kept) {
            prop_assert_eq!(got, want);
        }
        prop_assert_eq!(field.clear_completed_rows(), 0);
    }

    #[test]
    fn prop_active_figure_stays_legal(
        seed in any::<u64>(),
        script in prop::collection::vec((0usize..Intent::ALL.len(), any::<bool>()), 1..300),
    ) {
        let config = GameConfig { seed, ..GameConfig::default() };
        let mut manager =
            MovementManager::new(&config, Arc::new(ShapeRegistry::with_presets())).unwrap();
        for (index, tick) in script {
            if tick {
                manager.tick();
            } else {
                manager.apply(Intent::ALL[index]);
            }
            let interactor = manager.interactor();
            match interactor.active() {
                Some(active) if !manager.is_over() => {
                    prop_assert!(interactor.field().fits(active.cells()));
                }
                _ => prop_assert!(manager.is_over()),
            }
            prop_assert!(interactor.field().rows().all(|row| row.iter().any(|c| c.is_none())));
        }
    }
}
