//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (physics core, input mapping, terminal rendering).
//!
//! # Coordinates
//!
//! Field coordinates are `(row, col)` pairs:
//!
//! - **row**: 0 is the top row, grows downwards (gravity is `+1` row)
//! - **col**: 0 is the leftmost column, grows to the right
//!
//! Coordinates are signed so that hypothetical placements (a figure nudged past a
//! wall) can be expressed and then rejected by collision checks.
//!
//! # Default Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FALL_INTERVAL_MS` | 1000 | Gravity at level 0 |
//! | `DEFAULT_LEVEL_STEP_MS` | 75 | Interval shortening per level |
//! | `DEFAULT_MIN_INTERVAL_MS` | 100 | Fastest gravity |
//! | `DEFAULT_LINES_PER_LEVEL` | 10 | Lines needed per level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, RotationDirection, DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT};
//!
//! let intent = Intent::from_str("rotateCw").unwrap();
//! assert_eq!(intent, Intent::RotateCw);
//! assert_eq!(intent.rotation(), Some(RotationDirection::Clockwise));
//!
//! assert_eq!(DEFAULT_FIELD_WIDTH, 10);
//! assert_eq!(DEFAULT_FIELD_HEIGHT, 20);
//! ```

/// Default field width in cells (10 columns)
pub const DEFAULT_FIELD_WIDTH: u16 = 10;

/// Default field height in cells (20 rows)
pub const DEFAULT_FIELD_HEIGHT: u16 = 20;

/// Initial gravity interval (1000ms = 1 second per row)
pub const DEFAULT_FALL_INTERVAL_MS: u32 = 1000;

/// How much the fall interval shrinks per level
pub const DEFAULT_LEVEL_STEP_MS: u32 = 75;

/// Lower bound for the fall interval
pub const DEFAULT_MIN_INTERVAL_MS: u32 = 100;

/// Lines cleared per level
pub const DEFAULT_LINES_PER_LEVEL: u32 = 10;

/// Points per run of `n` contiguous cleared lines are `LINE_RUN_POINTS * n * n / 2`.
pub const LINE_RUN_POINTS: u32 = 100;

/// Absolute field coordinate `(row, col)`.
pub type Coord = (i16, i16);

/// Offset of a single occupied cell relative to a figure anchor `(row, col)`.
pub type Offset = (i16, i16);

/// Identity tag written into locked cells.
///
/// Tags are assigned 1-based in shape registration order, so renderers can map them
/// to colors without knowing the catalog.
pub type ShapeTag = u8;

/// A cell on the field
///
/// - `None`: Empty cell
/// - `Some(tag)`: Cell locked by a figure with the given shape tag
pub type Cell = Option<ShapeTag>;

/// Rotation direction for table-driven orientation changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Next orientation index, cyclic over `count` registered orientations.
    ///
    /// ```
    /// use blockfall_types::RotationDirection;
    ///
    /// assert_eq!(RotationDirection::Clockwise.apply(3, 4), 0);
    /// assert_eq!(RotationDirection::CounterClockwise.apply(0, 4), 3);
    /// assert_eq!(RotationDirection::Clockwise.apply(0, 1), 0);
    /// ```
    pub fn apply(self, orientation: usize, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        match self {
            RotationDirection::Clockwise => (orientation + 1) % count,
            RotationDirection::CounterClockwise => (orientation + count - 1) % count,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Discrete player commands accepted by the movement manager
///
/// These are produced by the input capture context and applied one at a time
/// through the mutation gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move figure one column left
    MoveLeft,
    /// Move figure one column right
    MoveRight,
    /// Rotate to the next registered orientation
    RotateCw,
    /// Rotate to the previous registered orientation
    RotateCcw,
    /// Apply one gravity step immediately
    SoftDrop,
    /// Fall until the figure locks
    HardDrop,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::RotateCw,
        Intent::RotateCcw,
        Intent::SoftDrop,
        Intent::HardDrop,
    ];

    /// Parse intent from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("HARDDROP"), Some(Intent::HardDrop));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            "softdrop" => Some(Intent::SoftDrop),
            "harddrop" => Some(Intent::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
            Intent::SoftDrop => "softDrop",
            Intent::HardDrop => "hardDrop",
        }
    }

    /// Column delta for horizontal moves.
    pub fn shift(&self) -> Option<i16> {
        match self {
            Intent::MoveLeft => Some(-1),
            Intent::MoveRight => Some(1),
            _ => None,
        }
    }

    pub fn rotation(&self) -> Option<RotationDirection> {
        match self {
            Intent::RotateCw => Some(RotationDirection::Clockwise),
            Intent::RotateCcw => Some(RotationDirection::CounterClockwise),
            _ => None,
        }
    }
}

/// Session phase
///
/// `Spawning -> Falling -> (Locking -> Spawning) | GameOver`.
/// Player intents are accepted only while `Falling`; `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Spawning,
    Falling,
    Locking,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Spawning => "spawning",
            GameStatus::Falling => "falling",
            GameStatus::Locking => "locking",
            GameStatus::GameOver => "game_over",
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::GameOver)
    }
}
