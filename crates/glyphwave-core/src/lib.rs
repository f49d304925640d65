//! Core types shared by the glyphwave crates.
//!
//! Text-art blocks and styles, the tuning parameters of the animation engine and the
//! foreground color themes a host can sample from.

mod art;
mod params;
mod theme;

pub use art::{ArtBlock, BLANK, Style, StyleSet};
pub use params::{CellMetrics, CycleParams, MorphParams, PhysicsParams};
pub use theme::ColorTheme;
