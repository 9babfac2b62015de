//! Terminal rendering for game sessions.
//!
//! Snapshots are painted onto a canvas by [`FieldView`] (pure) and flushed to
//! the terminal by [`TerminalRenderer`]. Nothing here reads or mutates the session
//! beyond the snapshot it is handed.

pub mod canvas;
pub mod renderer;
pub mod view;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use canvas::{Canvas, Glyph, Rect, Rgb, Style};
pub use renderer::{encode_frame_into, TerminalRenderer};
pub use view::{tag_color, FieldView, Viewport};
