//! Core game logic - field, figures, collision physics and intent handling
//!
//! Everything in this crate is synchronous and free of I/O. One session is a
//! [`MovementManager`] wrapping a [`PhysicalInteractor`], which owns the [`Field`], the
//! active [`Figure`], a next-figure slot, the [`FigureBuilder`] and the [`Scoreboard`].
//! Concurrency (gravity ticks racing player input) is layered on top by the engine
//! crate, which serializes every call into the manager behind one lock.
//!
//! # Module Structure
//!
//! - [`field`]: grid of locked cells, occupancy queries and row removal
//! - [`shape`]: shape templates, the immutable [`ShapeRegistry`] and the preset catalog
//! - [`catalog`]: JSON import path for additional shapes
//! - [`figure`]: the active piece (shape + orientation + anchor)
//! - [`builder`]: figure construction with forced or policy-selected shapes
//! - [`selection`]: uniform, bag and fixed-sequence shape selection
//! - [`physics`]: legality checks, wall kicks, gravity, locking and spawning
//! - [`movement`]: player intents mapped onto the physics layer
//! - [`scoring`]: line runs, score, level and fall speed
//! - [`snapshot`]: owned read-only session view for renderers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use blockfall_core::{GameConfig, MovementManager, ShapeRegistry};
//! use blockfall_types::{GameStatus, Intent};
//!
//! let registry = Arc::new(ShapeRegistry::with_presets());
//! let mut game = MovementManager::new(&GameConfig::default(), registry).unwrap();
//!
//! game.apply(Intent::MoveLeft);
//! game.apply(Intent::RotateCw);
//! game.apply(Intent::HardDrop);
//!
//! let snapshot = game.snapshot();
//! assert_eq!(snapshot.pieces, 1);
//! assert_eq!(snapshot.status, GameStatus::Falling);
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod field;
pub mod figure;
pub mod movement;
pub mod physics;
pub mod scoring;
pub mod selection;
pub mod shape;
pub mod snapshot;

pub use blockfall_types as types;

pub use builder::FigureBuilder;
pub use catalog::{load_catalog_file, parse_catalog, registry_from_templates, CatalogEntry};
pub use config::{GameConfig, SelectionPolicy, SpawnPolicy, SpeedRule, MAX_FIELD_DIMENSION};
pub use error::{BuildError, ConfigError, FieldError, RegistryError, SetupError};
pub use field::Field;
pub use figure::Figure;
pub use movement::MovementManager;
pub use physics::{PhysicalInteractor, StepOutcome, WALL_KICKS};
pub use scoring::{Scoreboard, MAX_PENDING_RUNS};
pub use selection::ShapeSelector;
pub use shape::{
    preset_templates, Shape, ShapeId, ShapeRegistry, ShapeTemplate, MAX_SHAPE_OFFSET,
};
pub use snapshot::{ActiveSnapshot, Snapshot};
