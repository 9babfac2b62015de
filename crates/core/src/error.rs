//! Error types for configuration, shape registration, figure building and field locking.
//!
//! Illegal moves and rotations are not errors; they are reported as `false` by the
//! physics layer. Everything here is either a startup problem or an invariant violation.

use std::fmt;

use crate::shape::ShapeId;
use crate::types::Offset;

/// Invalid game configuration, detected before a session is built.
#[derive(Debug)]
pub enum ConfigError {
    /// Field width or height is zero or beyond `MAX_FIELD_DIMENSION`.
    InvalidDimensions { width: u16, height: u16 },
    /// Initial fall interval is zero.
    ZeroFallInterval,
    /// A level needs at least one cleared line.
    ZeroLinesPerLevel,
    /// Reading a config or catalog file failed.
    Io { path: String, source: std::io::Error },
    /// A config or catalog file is not valid JSON for its schema.
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "field dimensions must be within 1..={}, got {width}x{height}",
                    crate::config::MAX_FIELD_DIMENSION
                )
            }
            ConfigError::ZeroFallInterval => write!(f, "fall interval must be positive"),
            ConfigError::ZeroLinesPerLevel => write!(f, "lines per level must be positive"),
            ConfigError::Io { path, source } => write!(f, "cannot read {path}: {source}"),
            ConfigError::Parse { path, source } => write!(f, "cannot parse {path}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Malformed or conflicting shape registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateShape(ShapeId),
    NoOrientations(ShapeId),
    EmptyOrientation { id: ShapeId, index: usize },
    /// An offset lies beyond `MAX_SHAPE_OFFSET` on some axis.
    OffsetOutOfRange {
        id: ShapeId,
        index: usize,
        offset: Offset,
    },
    /// The shape is wider than the field in some orientation and could never be placed.
    ShapeTooWide {
        id: ShapeId,
        width: u16,
        field_width: u16,
    },
    /// More shapes than distinct cell tags.
    TooManyShapes,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateShape(id) => write!(f, "shape {id} is already registered"),
            RegistryError::NoOrientations(id) => write!(f, "shape {id} has no orientations"),
            RegistryError::EmptyOrientation { id, index } => {
                write!(f, "orientation {index} of shape {id} has no occupied cells")
            }
            RegistryError::OffsetOutOfRange { id, index, offset } => write!(
                f,
                "orientation {index} of shape {id} has offset {offset:?} beyond +/-{}",
                crate::shape::MAX_SHAPE_OFFSET
            ),
            RegistryError::ShapeTooWide {
                id,
                width,
                field_width,
            } => write!(
                f,
                "shape {id} is {width} cells wide but the field has {field_width} columns"
            ),
            RegistryError::TooManyShapes => write!(f, "shape catalog exceeds 255 entries"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// `FigureBuilder::get_result` could not produce a figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Neither automatic selection nor `set_state` supplied a shape.
    NoShapeConfigured,
    UnknownShape(ShapeId),
    InvalidOrientation {
        id: ShapeId,
        index: usize,
        count: usize,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::NoShapeConfigured => write!(f, "no shape configured"),
            BuildError::UnknownShape(id) => write!(f, "shape {id} is not registered"),
            BuildError::InvalidOrientation { id, index, count } => write!(
                f,
                "shape {id} has {count} orientations, orientation {index} requested"
            ),
        }
    }
}

impl std::error::Error for BuildError {}

/// `Field::lock` targeted an occupied or out-of-bounds cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    InvalidCell { row: i16, col: i16 },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidCell { row, col } => {
                write!(f, "cannot lock cell ({row}, {col}): occupied or out of bounds")
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Anything that prevents a session from being built.
#[derive(Debug)]
pub enum SetupError {
    Config(ConfigError),
    Registry(RegistryError),
    Build(BuildError),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Config(err) => write!(f, "invalid configuration: {err}"),
            SetupError::Registry(err) => write!(f, "invalid shape catalog: {err}"),
            SetupError::Build(err) => write!(f, "cannot build figures: {err}"),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Config(err) => Some(err),
            SetupError::Registry(err) => Some(err),
            SetupError::Build(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SetupError {
    fn from(err: ConfigError) -> Self {
        SetupError::Config(err)
    }
}

impl From<RegistryError> for SetupError {
    fn from(err: RegistryError) -> Self {
        SetupError::Registry(err)
    }
}

impl From<BuildError> for SetupError {
    fn from(err: BuildError) -> Self {
        SetupError::Build(err)
    }
}
