//! MovementManager - player intents on top of the physics authority
//!
//! The manager owns the [`PhysicalInteractor`] and knows which intents are legal in
//! which phase, so callers can submit intents blindly. Intents outside the `Falling`
//! phase (including after game over) are dropped without effect.

use std::sync::Arc;

use crate::config::GameConfig;
use crate::error::SetupError;
use crate::physics::{PhysicalInteractor, StepOutcome};
use crate::shape::ShapeRegistry;
use crate::snapshot::Snapshot;
use crate::types::{GameStatus, Intent, RotationDirection};

#[derive(Debug, Clone)]
pub struct MovementManager {
    interactor: PhysicalInteractor,
}

impl MovementManager {
    /// Build a session and place its first figure.
    pub fn new(config: &GameConfig, registry: Arc<ShapeRegistry>) -> Result<Self, SetupError> {
        let mut interactor = PhysicalInteractor::new(config, registry)?;
        interactor.spawn()?;
        Ok(Self { interactor })
    }

    /// Wrap an interactor prepared by the caller (e.g. with forced figures).
    pub fn from_interactor(interactor: PhysicalInteractor) -> Self {
        Self { interactor }
    }

    /// Apply one intent. Returns true if the session changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        if self.interactor.status() != GameStatus::Falling {
            return false;
        }
        match intent {
            Intent::MoveLeft => self.interactor.try_move(0, -1),
            Intent::MoveRight => self.interactor.try_move(0, 1),
            Intent::RotateCw => self.interactor.try_rotate(RotationDirection::Clockwise),
            Intent::RotateCcw => self.interactor.try_rotate(RotationDirection::CounterClockwise),
            Intent::SoftDrop => self.interactor.step() != StepOutcome::Ignored,
            Intent::HardDrop => {
                let outcome = self.hard_drop();
                outcome != StepOutcome::Ignored
            }
        }
    }

    /// Step until the active figure locks (or the session ends).
    fn hard_drop(&mut self) -> StepOutcome {
        loop {
            match self.interactor.step() {
                StepOutcome::Fell => continue,
                outcome => return outcome,
            }
        }
    }

    /// One gravity tick.
    pub fn tick(&mut self) -> StepOutcome {
        self.interactor.step()
    }

    pub fn status(&self) -> GameStatus {
        self.interactor.status()
    }

    pub fn is_over(&self) -> bool {
        self.interactor.is_over()
    }

    pub fn interactor(&self) -> &PhysicalInteractor {
        &self.interactor
    }

    pub fn interactor_mut(&mut self) -> &mut PhysicalInteractor {
        &mut self.interactor
    }

    pub fn take_scored_runs(&mut self) -> Vec<u32> {
        self.interactor.take_scored_runs()
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.interactor.fall_interval_ms()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.interactor.snapshot()
    }
}
