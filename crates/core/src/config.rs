//! Session configuration
//!
//! Read once at startup and treated as immutable for the lifetime of a session.
//! Sources, lowest priority first: defaults, a JSON file, environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    DEFAULT_FALL_INTERVAL_MS, DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, DEFAULT_LEVEL_STEP_MS,
    DEFAULT_LINES_PER_LEVEL, DEFAULT_MIN_INTERVAL_MS,
};

/// Largest accepted field width or height. Half the `i16` range, so a spawn anchor
/// plus any shape offset (see [`MAX_SHAPE_OFFSET`](crate::MAX_SHAPE_OFFSET)) stays representable.
pub const MAX_FIELD_DIMENSION: u16 = (i16::MAX / 2) as u16;

/// How the builder picks the next shape when no explicit state was set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Independent uniform draw over the catalog.
    Uniform,
    /// Shuffled bag containing every shape once, refilled when empty.
    #[default]
    Bag,
    /// Fixed cyclic sequence of shape identities (deterministic play and tests); shapes
    /// it omits are appended so every registered shape stays reachable.
    Sequence(Vec<String>),
}

/// Where a freshly built figure is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// Horizontally centered on the top row.
    #[default]
    Center,
    /// Random column on the top row where the figure fits.
    Random,
}

/// Gravity progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedRule {
    pub lines_per_level: u32,
    pub step_ms: u32,
    pub min_interval_ms: u32,
}

impl Default for SpeedRule {
    fn default() -> Self {
        Self {
            lines_per_level: DEFAULT_LINES_PER_LEVEL,
            step_ms: DEFAULT_LEVEL_STEP_MS,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: u16,
    pub field_height: u16,
    /// Fall interval at level 0.
    pub fall_interval_ms: u32,
    pub speed: SpeedRule,
    pub selection: SelectionPolicy,
    pub spawn: SpawnPolicy,
    /// Try compensating translations when a direct rotation is blocked.
    pub wall_kicks: bool,
    pub seed: u64,
    /// Optional JSON shape catalog replacing the presets.
    pub catalog_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            fall_interval_ms: DEFAULT_FALL_INTERVAL_MS,
            speed: SpeedRule::default(),
            selection: SelectionPolicy::default(),
            spawn: SpawnPolicy::default(),
            wall_kicks: true,
            seed: 1,
            catalog_path: None,
        }
    }
}

impl GameConfig {
    /// Load from a JSON file; missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Defaults overridden by environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `BLOCKFALL_*` environment overrides. Unparseable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
            value.and_then(|s| s.trim().parse().ok())
        }

        if let Some(width) = parsed(lookup("BLOCKFALL_WIDTH")) {
            self.field_width = width;
        }
        if let Some(height) = parsed(lookup("BLOCKFALL_HEIGHT")) {
            self.field_height = height;
        }
        if let Some(ms) = parsed(lookup("BLOCKFALL_FALL_MS")) {
            self.fall_interval_ms = ms;
        }
        if let Some(seed) = parsed(lookup("BLOCKFALL_SEED")) {
            self.seed = seed;
        }
        if let Some(kicks) = parsed(lookup("BLOCKFALL_WALL_KICKS")) {
            self.wall_kicks = kicks;
        }
        if let Some(path) = lookup("BLOCKFALL_CATALOG")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            self.catalog_path = Some(path);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = 1..=MAX_FIELD_DIMENSION;
        if !valid.contains(&self.field_width) || !valid.contains(&self.field_height) {
            return Err(ConfigError::InvalidDimensions {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.fall_interval_ms == 0 {
            return Err(ConfigError::ZeroFallInterval);
        }
        if self.speed.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        Ok(())
    }

    /// Fall interval at `level`, never below the configured floor (or 1ms).
    pub fn fall_interval_for_level(&self, level: u32) -> u32 {
        let floor = self.speed.min_interval_ms.max(1);
        self.fall_interval_ms
            .saturating_sub(level.saturating_mul(self.speed.step_ms))
            .max(floor)
    }
}
