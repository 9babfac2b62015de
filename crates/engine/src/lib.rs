//! Concurrency wiring for a game session.
//!
//! The core crate is single-threaded; this crate lets a gravity task, an input
//! producer and a renderer share one session. All mutation goes through the
//! [`Gateway`] lock; rendering reads published snapshots only.
//!
//! ```no_run
//! use std::sync::Arc;
//! use blockfall_engine::{Engine, EngineConfig};
//! use blockfall_engine::core::{GameConfig, MovementManager, ShapeRegistry};
//! use blockfall_engine::types::Intent;
//!
//! # async fn demo() {
//! let manager = MovementManager::new(&GameConfig::default(), Arc::new(ShapeRegistry::with_presets()))
//!     .unwrap();
//! let engine = Engine::start(manager, EngineConfig::default());
//! engine.intents().send(Intent::HardDrop).await.unwrap();
//! let mut frames = engine.snapshots();
//! frames.changed().await.unwrap();
//! engine.shutdown().await;
//! # }
//! ```

pub mod gateway;
pub mod runner;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use gateway::Gateway;
pub use runner::{Engine, EngineConfig, Shutdown, DEFAULT_INTENT_CAPACITY, DEFAULT_RENDER_INTERVAL_MS};
