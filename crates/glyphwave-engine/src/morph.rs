//! Glitch-then-resolve transition between two art blocks.

use glyphwave_core::ArtBlock;
use tracing::debug;

use crate::chars::GLITCH_CHARS;
use crate::grid::Grid;
use crate::rng::GlitchRng;

/// Fraction of a cell's threshold after which it starts glitching.
pub const GLITCH_START: f32 = 0.3;

/// Progress at which the cell at `(row, col)` resolves to its target glyph.
///
/// A fixed wave over the grid, always inside `(0.15, 0.85)`.
pub fn threshold(row: usize, col: usize) -> f32 {
    let (r, c) = (row as f32, col as f32);
    let wave = (c * 0.31 + r * 0.47).sin() * 0.6 + (c * 0.13 - r * 0.21).cos() * 0.4;
    0.5 + 0.34 * wave
}

/// Row-major thresholds of a `rows` x `cols` grid.
pub fn thresholds_for(rows: usize, cols: usize) -> Vec<f32> {
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| threshold(row, col)))
        .collect()
}

#[derive(Debug)]
struct MorphState<T> {
    start_ms: u64,
    duration_ms: u64,
    /// Glyphs of every cell when the morph started.
    snapshot: Vec<char>,
    /// Glyph every cell resolves to.
    targets: Vec<char>,
    thresholds: Vec<f32>,
    target: ArtBlock,
    on_complete: T,
}

impl<T> MorphState<T> {
    fn progress(&self, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }
}

/// Drives at most one morph at a time.
///
/// `T` is the completion token handed back by [`MorphController::update`] exactly
/// once, when the morph finishes.
#[derive(Debug)]
pub struct MorphController<T> {
    state: Option<MorphState<T>>,
}

impl<T> Default for MorphController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MorphController<T> {
    pub fn new() -> Self {
        Self { state: None }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Progress of the active morph at `now_ms`.
    pub fn progress(&self, now_ms: u64) -> Option<f32> {
        self.state.as_ref().map(|s| s.progress(now_ms))
    }

    /// Thresholds of the active morph.
    pub fn thresholds(&self) -> Option<&[f32]> {
        self.state.as_ref().map(|s| s.thresholds.as_slice())
    }

    /// Begin morphing `grid` towards `target`.
    ///
    /// Returns `false` and changes nothing if a morph is already running. Positions
    /// missing from `target` resolve to blanks.
    pub fn start(
        &mut self,
        grid: &Grid,
        target: &ArtBlock,
        now_ms: u64,
        duration_ms: u64,
        on_complete: T,
    ) -> bool {
        if self.state.is_some() {
            return false;
        }
        let cells = grid.cells();
        debug!(
            cells = cells.len(),
            rows = target.height(),
            cols = target.width(),
            duration_ms,
            "morph started"
        );
        self.state = Some(MorphState {
            start_ms: now_ms,
            duration_ms,
            snapshot: cells.iter().map(|cell| cell.glyph).collect(),
            targets: cells
                .iter()
                .map(|cell| target.glyph(cell.row, cell.col))
                .collect(),
            thresholds: cells
                .iter()
                .map(|cell| threshold(cell.row, cell.col))
                .collect(),
            target: target.clone(),
            on_complete,
        });
        true
    }

    /// Advance the active morph to `now_ms`.
    ///
    /// When the morph reaches full progress the grid is rebuilt for the target block
    /// and the completion token is returned.
    pub fn update(&mut self, grid: &mut Grid, now_ms: u64, rng: &mut GlitchRng) -> Option<T> {
        let state = self.state.as_ref()?;
        let progress = state.progress(now_ms);

        let per_cell = state
            .snapshot
            .iter()
            .zip(&state.targets)
            .zip(&state.thresholds);
        for (cell, ((&original, &target), &threshold)) in grid.cells_mut().iter_mut().zip(per_cell)
        {
            cell.glyph = if progress >= threshold {
                target
            } else if progress > threshold * GLITCH_START {
                rng.pick(GLITCH_CHARS)
            } else {
                original
            };
        }

        if progress < 1.0 {
            return None;
        }
        let state = self.state.take()?;
        grid.rebuild(&state.target);
        debug!(rows = grid.rows(), cols = grid.cols(), "morph complete");
        Some(state.on_complete)
    }
}
