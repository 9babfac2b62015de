//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Intent`] and runs the input
//! capture thread, which only enqueues intents for the engine to apply.

pub mod capture;
pub mod map;

pub use blockfall_types as types;

pub use capture::{run_capture, spawn_capture, CaptureExit, KeySource, TerminalKeys};
pub use map::{handle_key_event, should_quit};
