//! PhysicalInteractor - the collision and gravity authority
//!
//! Owns the session aggregate (field, active figure, next-figure slot, builder and
//! counters) and is the only code that mutates it. Every public mutating call either
//! completes fully or leaves the session unchanged, so the active figure is always at
//! a legal placement between calls.
//!
//! Phases:
//!
//! ```text
//! Spawning -> Falling -> Locking -> Spawning -> ...
//!                 \                     \
//!                  `---------------------`-> GameOver (terminal)
//! ```
//!
//! Rotation legality: the direct rotation is tried first. With wall kicks enabled a
//! blocked rotation is retried at the offsets in [`WALL_KICKS`], in order, and the first
//! legal placement wins. With wall kicks disabled a single direct check decides.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::builder::FigureBuilder;
use crate::config::GameConfig;
use crate::error::{BuildError, SetupError};
use crate::field::Field;
use crate::figure::Figure;
use crate::scoring::Scoreboard;
use crate::shape::{ShapeId, ShapeRegistry};
use crate::snapshot::{ActiveSnapshot, Snapshot};
use crate::types::{Coord, GameStatus, Offset, RotationDirection};

/// Compensating `(row, col)` translations tried after a blocked rotation.
pub const WALL_KICKS: [Offset; 5] = [(0, -1), (0, 1), (0, -2), (0, 2), (-1, 0)];

/// Result of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A new active figure was placed.
    Spawned,
    /// The figure moved down one row.
    Fell,
    /// The figure was locked and the next one spawned.
    Locked { lines_cleared: u32 },
    /// The session ended during this step.
    GameOver,
    /// Nothing to do (the session is already over).
    Ignored,
}

impl StepOutcome {
    pub fn is_lock(&self) -> bool {
        matches!(self, StepOutcome::Locked { .. })
    }
}

/// Collision/physics authority for one session.
#[derive(Debug, Clone)]
pub struct PhysicalInteractor {
    config: GameConfig,
    field: Field,
    builder: FigureBuilder,
    active: Option<Figure>,
    next: Option<Figure>,
    status: GameStatus,
    scoreboard: Scoreboard,
}

impl PhysicalInteractor {
    /// Build a session in the `Spawning` phase. Nothing is placed until [`spawn`](Self::spawn).
    pub fn new(config: &GameConfig, registry: Arc<ShapeRegistry>) -> Result<Self, SetupError> {
        config.validate()?;
        if registry.is_empty() {
            return Err(BuildError::NoShapeConfigured.into());
        }
        registry.check_fits(config.field_width)?;
        let builder = FigureBuilder::new(registry, config)?;

        log::info!(
            "session: {}x{} field, {} shapes, wall kicks {}",
            config.field_width,
            config.field_height,
            builder.registry().len(),
            if config.wall_kicks { "on" } else { "off" }
        );

        Ok(Self {
            config: config.clone(),
            field: Field::new(config.field_width, config.field_height),
            builder,
            active: None,
            next: None,
            status: GameStatus::Spawning,
            scoreboard: Scoreboard::from_config(config),
        })
    }

    /// Move `figure` by `(delta_row, delta_col)` if every resulting cell is free.
    ///
    /// Returns false and leaves the figure untouched when the move is illegal.
    pub fn try_move_figure(figure: &mut Figure, field: &Field, delta_row: i16, delta_col: i16) -> bool {
        let target = figure.translate(delta_row, delta_col);
        if field.fits(figure.cells_at(target, figure.orientation())) {
            figure.place(target, figure.orientation());
            true
        } else {
            false
        }
    }

    /// Rotate `figure` if the rotated placement (or, with `wall_kicks`, a kicked one) is free.
    pub fn try_rotate_figure(
        figure: &mut Figure,
        field: &Field,
        direction: RotationDirection,
        wall_kicks: bool,
    ) -> bool {
        let orientation = figure.rotate(direction);
        let mut candidates: ArrayVec<Offset, 6> = ArrayVec::new();
        candidates.push((0, 0));
        if wall_kicks {
            candidates.extend(WALL_KICKS);
        }

        for (dr, dc) in candidates {
            let anchor = figure.translate(dr, dc);
            if field.fits(figure.cells_at(anchor, orientation)) {
                figure.place(anchor, orientation);
                return true;
            }
        }
        false
    }

    /// Translate the active figure. Only accepted while falling.
    pub fn try_move(&mut self, delta_row: i16, delta_col: i16) -> bool {
        if self.status != GameStatus::Falling {
            return false;
        }
        match self.active.as_mut() {
            Some(figure) => Self::try_move_figure(figure, &self.field, delta_row, delta_col),
            None => false,
        }
    }

    /// Rotate the active figure. Only accepted while falling.
    pub fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        if self.status != GameStatus::Falling {
            return false;
        }
        let wall_kicks = self.config.wall_kicks;
        match self.active.as_mut() {
            Some(figure) => Self::try_rotate_figure(figure, &self.field, direction, wall_kicks),
            None => false,
        }
    }

    /// The gravity tick.
    ///
    /// Falls one row if possible; otherwise locks the figure, clears completed rows and
    /// spawns the next figure. A spawn collision ends the session.
    pub fn step(&mut self) -> StepOutcome {
        match self.status {
            GameStatus::GameOver => StepOutcome::Ignored,
            GameStatus::Spawning | GameStatus::Locking => self.spawn_outcome(),
            GameStatus::Falling => {
                if self.try_move(1, 0) {
                    return StepOutcome::Fell;
                }
                let lines_cleared = match self.lock_active() {
                    Some(lines) => lines,
                    None => return StepOutcome::GameOver,
                };
                match self.spawn_outcome() {
                    StepOutcome::Spawned => StepOutcome::Locked { lines_cleared },
                    other => other,
                }
            }
        }
    }

    /// Place the next figure (from the next slot or the builder).
    ///
    /// Returns Ok(false) and enters GameOver when the spawn placement is blocked.
    /// A no-op while a figure is already falling. On a build error nothing changes,
    /// except that a figure built for an empty next slot is kept there.
    pub fn spawn(&mut self) -> Result<bool, BuildError> {
        match self.status {
            GameStatus::GameOver => return Ok(false),
            GameStatus::Falling => return Ok(true),
            GameStatus::Spawning | GameStatus::Locking => {}
        }
        let figure = match self.next.take() {
            Some(figure) => figure,
            None => self.builder.get_result()?,
        };
        let next = match self.builder.get_result() {
            Ok(next) => next,
            Err(err) => {
                self.next = Some(figure);
                return Err(err);
            }
        };
        self.next = Some(next);
        self.status = GameStatus::Spawning;

        if !self.field.fits(figure.cells()) {
            log::info!(
                "game over: {} blocked at {:?}, score {}, lines {}",
                figure.shape_id(),
                figure.anchor(),
                self.scoreboard.score(),
                self.scoreboard.lines()
            );
            self.active = None;
            self.status = GameStatus::GameOver;
            return Ok(false);
        }

        log::debug!("spawned {} at {:?}", figure.shape_id(), figure.anchor());
        self.active = Some(figure);
        self.status = GameStatus::Falling;
        Ok(true)
    }

    /// Replace the next-figure slot with an explicit configuration.
    pub fn force_next(
        &mut self,
        shape: impl Into<ShapeId>,
        orientation: usize,
        anchor: Coord,
    ) -> Result<(), BuildError> {
        self.builder.set_state(shape, orientation, anchor);
        self.next = Some(self.builder.get_result()?);
        Ok(())
    }

    fn spawn_outcome(&mut self) -> StepOutcome {
        match self.spawn() {
            Ok(true) => StepOutcome::Spawned,
            Ok(false) => StepOutcome::GameOver,
            Err(err) => {
                log::error!("cannot build next figure: {err}");
                self.active = None;
                self.status = GameStatus::GameOver;
                StepOutcome::GameOver
            }
        }
    }

    /// Write the active figure into the field and clear rows. None on an invariant violation.
    fn lock_active(&mut self) -> Option<u32> {
        let figure = self.active.take()?;
        self.status = GameStatus::Locking;

        if let Err(err) = self.field.lock(figure.cells(), figure.tag()) {
            debug_assert!(false, "lock of a legal placement failed: {err}");
            log::error!("{err}; ending session");
            self.status = GameStatus::GameOver;
            return None;
        }

        let removed = self.field.remove_completed_rows();
        let level_before = self.scoreboard.level();
        if self.scoreboard.record_lock(&removed) {
            log::info!(
                "level {} -> {} (fall interval {}ms)",
                level_before,
                self.scoreboard.level(),
                self.fall_interval_ms()
            );
        }
        log::debug!(
            "locked {} at {:?}, cleared rows {:?}",
            figure.shape_id(),
            figure.anchor(),
            removed
        );
        Some(removed.len() as u32)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Direct field access for setting up positions before play.
    ///
    /// Callers must not make the active figure's placement illegal.
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn active(&self) -> Option<&Figure> {
        self.active.as_ref()
    }

    pub fn next(&self) -> Option<&Figure> {
        self.next.as_ref()
    }

    pub fn builder_mut(&mut self) -> &mut FigureBuilder {
        &mut self.builder
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Drain the line runs scored since the previous call.
    pub fn take_scored_runs(&mut self) -> Vec<u32> {
        self.scoreboard.take_scored_runs()
    }

    /// Current gravity interval.
    pub fn fall_interval_ms(&self) -> u32 {
        self.config.fall_interval_for_level(self.scoreboard.level())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.field.width(),
            height: self.field.height(),
            field: self.field.cells().to_vec(),
            active: self.active.as_ref().map(|figure| ActiveSnapshot {
                shape: figure.shape_id().clone(),
                tag: figure.tag(),
                orientation: figure.orientation(),
                anchor: figure.anchor(),
                cells: figure.cells().collect(),
            }),
            next: self.next.as_ref().map(|figure| figure.shape_id().clone()),
            status: self.status,
            score: self.scoreboard.score(),
            lines: self.scoreboard.lines(),
            level: self.scoreboard.level(),
            pieces: self.scoreboard.pieces(),
            fall_interval_ms: self.fall_interval_ms(),
        }
    }
}
