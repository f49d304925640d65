//! Tuning parameters for the animation engine.
//!
//! All distances are logical units (the coordinate space of the glyph grid), all
//! durations are milliseconds.

use serde::{Deserialize, Serialize};

/// Fixed metrics of one monospace glyph cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellMetrics {
    /// Horizontal advance of one glyph.
    pub cell_width: f32,
    /// Vertical distance between rows.
    pub line_height: f32,
    /// Font size handed to the surface when drawing.
    pub font_size: f32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            line_height: 16.0,
            font_size: 13.0,
        }
    }
}

/// Pointer repulsion and spring constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Cells whose rest position is closer than this to the pointer are pushed away.
    pub repel_radius: f32,
    /// Velocity impulse applied at distance zero.
    pub repel_strength: f32,
    /// Fraction of the offset from rest turned into velocity each frame.
    pub spring: f32,
    /// Velocity multiplier per frame, must be below 1.
    pub damping: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            repel_radius: 90.0,
            repel_strength: 1.6,
            spring: 0.06,
            damping: 0.82,
        }
    }
}

/// Morph transition timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphParams {
    pub duration_ms: u64,
}

impl Default for MorphParams {
    fn default() -> Self {
        Self { duration_ms: 1400 }
    }
}

/// Pauses between automatic morphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleParams {
    /// Pause before the first morph.
    pub initial_delay_ms: u64,
    /// Growth of the pause after every completed morph.
    pub step_ms: u64,
    /// Upper bound of the pause.
    pub max_pause_ms: u64,
}

impl Default for CycleParams {
    fn default() -> Self {
        Self {
            initial_delay_ms: 4000,
            step_ms: 2000,
            max_pause_ms: 16000,
        }
    }
}

impl CycleParams {
    /// The pause following `current`.
    pub fn grow(&self, current: u64) -> u64 {
        current.saturating_add(self.step_ms).min(self.max_pause_ms)
    }

    /// The `n`-th pause of an instance, counting from 1.
    pub fn nth_pause(&self, n: u32) -> u64 {
        let steps = u64::from(n.saturating_sub(1));
        self.initial_delay_ms
            .saturating_add(steps.saturating_mul(self.step_ms))
            .min(self.max_pause_ms)
    }
}
