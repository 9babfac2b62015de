use crate::shape::ShapeId;
use crate::types::{Cell, Coord, GameStatus, ShapeTag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub shape: ShapeId,
    pub tag: ShapeTag,
    pub orientation: usize,
    pub anchor: Coord,
    /// Absolute occupied cells.
    pub cells: Vec<Coord>,
}

/// Read-only view of a session, taken after a mutation completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: u16,
    pub height: u16,
    /// Locked cells, row-major.
    pub field: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<ShapeId>,
    pub status: GameStatus,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub pieces: u32,
    pub fall_interval_ms: u32,
}

impl Snapshot {
    /// Locked cell at `(row, col)`; None outside the field.
    pub fn locked(&self, row: i16, col: i16) -> Option<Cell> {
        if row < 0 || col < 0 || row >= self.height as i16 || col >= self.width as i16 {
            return None;
        }
        self.field
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    /// Cell as displayed: the active figure drawn over the locked field.
    pub fn visible(&self, row: i16, col: i16) -> Cell {
        if let Some(active) = &self.active {
            if active.cells.contains(&(row, col)) {
                return Some(active.tag);
            }
        }
        self.locked(row, col).flatten()
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// `#`/`.` rows including the active figure.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height as i16)
            .map(|row| {
                (0..self.width as i16)
                    .map(|col| if self.visible(row, col).is_some() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            field: Vec::new(),
            active: None,
            next: None,
            status: GameStatus::Spawning,
            score: 0,
            lines: 0,
            level: 0,
            pieces: 0,
            fall_interval_ms: 0,
        }
    }
}
