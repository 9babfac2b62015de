//! Scoring module - line runs, level and fall speed bookkeeping
//!
//! A lock may clear several rows. Rows that were adjacent before removal form one
//! *run*; each run of `n` rows is worth `LINE_RUN_POINTS * n * n / 2`, so clearing
//! rows together pays more than clearing them one at a time.

use std::collections::VecDeque;

use crate::config::GameConfig;
use crate::types::LINE_RUN_POINTS;

/// Scored runs kept for `take_scored_runs`; older ones are discarded first.
pub const MAX_PENDING_RUNS: usize = 64;

/// Points for one run of `lines` contiguous cleared rows.
pub fn run_score(lines: u32) -> u32 {
    LINE_RUN_POINTS
        .saturating_mul(lines)
        .saturating_mul(lines)
        / 2
}

/// Split removed row indices (sorted, pre-shift) into lengths of contiguous runs.
pub fn contiguous_runs(rows: &[usize]) -> Vec<u32> {
    let mut runs = Vec::new();
    let mut iter = rows.iter().copied();
    let Some(mut prev) = iter.next() else {
        return runs;
    };
    let mut len = 1u32;
    for row in iter {
        if row == prev + 1 {
            len += 1;
        } else {
            runs.push(len);
            len = 1;
        }
        prev = row;
    }
    runs.push(len);
    runs
}

/// Session counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    lines: u32,
    pieces: u32,
    level: u32,
    lines_per_level: u32,
    /// Runs recorded since the last `take_scored_runs`, at most `MAX_PENDING_RUNS`.
    pending_runs: VecDeque<u32>,
}

impl Scoreboard {
    pub fn new(lines_per_level: u32) -> Self {
        Self {
            score: 0,
            lines: 0,
            pieces: 0,
            level: 0,
            lines_per_level: lines_per_level.max(1),
            pending_runs: VecDeque::new(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.speed.lines_per_level)
    }

    /// Record one lock and the rows it removed. Returns true when the level changed.
    pub fn record_lock(&mut self, removed_rows: &[usize]) -> bool {
        self.pieces = self.pieces.saturating_add(1);
        for run in contiguous_runs(removed_rows) {
            self.score = self.score.saturating_add(run_score(run));
            self.lines = self.lines.saturating_add(run);
            if self.pending_runs.len() == MAX_PENDING_RUNS {
                self.pending_runs.pop_front();
            }
            self.pending_runs.push_back(run);
        }
        let level = self.lines / self.lines_per_level;
        let changed = level != self.level;
        self.level = level;
        changed
    }

    /// Drain the runs scored since the previous call.
    pub fn take_scored_runs(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.pending_runs).into()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.lines_per_level);
    }
}
