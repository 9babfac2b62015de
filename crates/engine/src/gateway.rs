//! Mutation gateway - the single path into the session.
//!
//! Every mutation (player intent or gravity tick) takes the session lock, runs to
//! completion, publishes a fresh snapshot and only then releases the lock. Readers
//! never take the lock; they observe the latest published [`Snapshot`], so they can
//! never see a field mid-lock or a figure mid-rotation. Snapshots are published in
//! mutation order because publication happens inside the critical section.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::core::{MovementManager, Snapshot, StepOutcome};
use crate::types::{GameStatus, Intent};

#[derive(Debug, Clone)]
pub struct Gateway {
    session: Arc<Mutex<MovementManager>>,
    snapshots: Arc<watch::Sender<Arc<Snapshot>>>,
}

impl Gateway {
    pub fn new(manager: MovementManager) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(manager.snapshot()));
        Self {
            session: Arc::new(Mutex::new(manager)),
            snapshots: Arc::new(tx),
        }
    }

    /// Apply one intent under the lock. Returns true if the session changed.
    pub fn apply(&self, intent: Intent) -> bool {
        let mut session = self.session.lock();
        let changed = session.apply(intent);
        if changed {
            self.snapshots.send_replace(Arc::new(session.snapshot()));
        }
        changed
    }

    /// One gravity tick under the lock.
    pub fn tick(&self) -> StepOutcome {
        let mut session = self.session.lock();
        let outcome = session.tick();
        if outcome != StepOutcome::Ignored {
            self.snapshots.send_replace(Arc::new(session.snapshot()));
        }
        outcome
    }

    /// Receiver of published snapshots; starts at the latest one.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.snapshots.subscribe()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn status(&self) -> GameStatus {
        self.snapshots.borrow().status
    }

    /// Gravity interval at the current level.
    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.snapshots.borrow().fall_interval_ms.max(1)))
    }

    /// Drain the line runs scored since the previous call.
    pub fn take_scored_runs(&self) -> Vec<u32> {
        self.session.lock().take_scored_runs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, PhysicalInteractor, SelectionPolicy, ShapeRegistry};
    use std::thread;

    fn gateway() -> Gateway {
        let config = GameConfig {
            selection: SelectionPolicy::Sequence(vec!["O".into()]),
            ..GameConfig::default()
        };
        let mut interactor =
            PhysicalInteractor::new(&config, Arc::new(ShapeRegistry::with_presets())).unwrap();
        interactor.builder_mut().set_state("O", 0, (0, 4));
        interactor.spawn().unwrap();
        Gateway::new(MovementManager::from_interactor(interactor))
    }

    fn anchor(snapshot: &Snapshot) -> (i16, i16) {
        snapshot.active.as_ref().unwrap().anchor
    }

    #[test]
    fn test_snapshot_published_after_each_mutation() {
        let gw = gateway();
        let mut rx = gw.subscribe();
        assert_eq!(anchor(&rx.borrow_and_update()), (0, 4));

        assert!(gw.apply(Intent::MoveLeft));
        assert!(rx.has_changed().unwrap());
        assert_eq!(anchor(&rx.borrow_and_update()), (0, 3));

        assert_eq!(gw.tick(), StepOutcome::Fell);
        assert_eq!(anchor(&gw.snapshot()), (1, 3));
    }

    #[test]
    fn test_rejected_intent_publishes_nothing() {
        let gw = gateway();
        for _ in 0..4 {
            assert!(gw.apply(Intent::MoveLeft));
        }
        let mut rx = gw.subscribe();
        assert!(!gw.apply(Intent::MoveLeft));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(anchor(&rx.borrow_and_update()), (0, 0));
    }

    #[test]
    fn test_scored_runs_are_drained_once() {
        let gw = gateway();
        {
            let mut session = gw.session.lock();
            let filler: Vec<(i16, i16)> = (0..10)
                .filter(|c| !(4..6).contains(c))
                .flat_map(|c| [(18, c), (19, c)])
                .collect();
            session.interactor_mut().field_mut().lock(filler, 9).unwrap();
        }
        assert!(gw.apply(Intent::HardDrop));
        assert_eq!(gw.snapshot().score, 200);
        assert_eq!(gw.take_scored_runs(), vec![2]);
        assert!(gw.take_scored_runs().is_empty());
    }

    #[test]
    fn test_concurrent_callers_are_serialized() {
        let gw = gateway();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let gw = gw.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        if i % 2 == 0 {
                            gw.tick();
                        } else {
                            gw.apply(Intent::RotateCw);
                            gw.apply(Intent::MoveRight);
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Every published state satisfies the placement invariant.
        let snap = gw.snapshot();
        if let Some(active) = &snap.active {
            for &(row, col) in &active.cells {
                assert_eq!(snap.locked(row, col), Some(None));
            }
        }
    }
}
