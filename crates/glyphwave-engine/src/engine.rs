//! The engine: one instance per attached surface.

use glyphwave_core::{
    ArtBlock, CellMetrics, CycleParams, MorphParams, PhysicsParams, Style, StyleSet,
};
use ratatui::style::Color;
use tracing::{debug, info};

use crate::cycle::CycleScheduler;
use crate::grid::Grid;
use crate::morph::MorphController;
use crate::physics::{self, Pointer};
use crate::rng::GlitchRng;
use crate::scheduler::{FrameHandle, ManualScheduler, Scheduler, TimerHandle, Wakeup};
use crate::surface::{Pen, Surface};

/// Fixed tuning of an engine instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub cells: CellMetrics,
    pub physics: PhysicsParams,
    pub morph: MorphParams,
    pub cycle: CycleParams,
    /// Backing pixels per logical unit.
    pub density: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cells: CellMetrics::default(),
            physics: PhysicsParams::default(),
            morph: MorphParams::default(),
            cycle: CycleParams::default(),
            density: 1.0,
        }
    }
}

/// Glyph grid animation bound to one surface.
///
/// Every frame runs the active morph, then the pointer physics, then redraws the
/// surface, then requests the next frame. Between frames the cycle timer decides
/// when the next morph begins.
pub struct GlyphEngine<S: Scheduler, R: Surface> {
    config: EngineConfig,
    style: Option<Style>,
    grid: Grid,
    morph: MorphController<usize>,
    cycle: CycleScheduler,
    pointer: Pointer,
    pen: Pen,
    rng: GlitchRng,
    scheduler: S,
    surface: Option<R>,
    frame: Option<FrameHandle>,
    running: bool,
}

impl<S: Scheduler, R: Surface> GlyphEngine<S, R> {
    /// Create an engine showing the first block of `style`.
    ///
    /// `foreground` is sampled once here; a theme change needs a new instance.
    pub fn new(
        config: EngineConfig,
        style: Option<Style>,
        foreground: Color,
        scheduler: S,
        surface: R,
        rng: GlitchRng,
    ) -> Self {
        let first = style
            .as_ref()
            .and_then(|s| s.blocks.first())
            .cloned()
            .unwrap_or_default();
        let block_count = style.as_ref().map_or(0, |s| s.blocks.len());
        Self {
            grid: Grid::build(&first, config.cells),
            morph: MorphController::new(),
            cycle: CycleScheduler::new(config.cycle, block_count),
            pointer: Pointer::FAR_AWAY,
            pen: Pen {
                color: foreground,
                font_size: config.cells.font_size,
            },
            config,
            style,
            rng,
            scheduler,
            surface: Some(surface),
            frame: None,
            running: false,
        }
    }

    /// Create an engine for a style picked from `styles`.
    ///
    /// A `pinned` name that matches a style wins, otherwise the style is chosen at
    /// random. An empty set gives an inert engine.
    pub fn with_style_set(
        config: EngineConfig,
        styles: &StyleSet,
        pinned: Option<&str>,
        foreground: Color,
        scheduler: S,
        surface: R,
        mut rng: GlitchRng,
    ) -> Self {
        let style = pinned
            .and_then(|name| styles.find(name))
            .or_else(|| styles.choose(rng.next_u64()))
            .cloned();
        Self::new(config, style, foreground, scheduler, surface, rng)
    }

    /// Start the frame loop and the cycle timer.
    ///
    /// Does nothing without any block to show.
    pub fn start(&mut self) {
        if self.running || self.surface.is_none() {
            return;
        }
        let Some(style) = &self.style else {
            debug!("no style data, engine stays inert");
            return;
        };
        if style.blocks.is_empty() {
            debug!(style = %style.name, "style has no blocks, engine stays inert");
            return;
        }
        info!(style = %style.name, blocks = style.blocks.len(), "engine started");
        self.running = true;
        self.resize_surface();
        self.frame = Some(self.scheduler.request_frame());
        self.cycle.arm(&mut self.scheduler);
    }

    /// Tear down: cancel the frame loop and the cycle timer, then release the surface.
    ///
    /// Safe to call more than once; later calls return `None`.
    pub fn stop(&mut self) -> Option<R> {
        if let Some(frame) = self.frame.take() {
            self.scheduler.cancel_frame(frame);
        }
        self.cycle.cancel(&mut self.scheduler);
        if self.running {
            info!("engine stopped");
        }
        self.running = false;
        self.surface.take()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One display refresh at `now_ms`.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: u64) {
        if !self.running || self.frame != Some(handle) {
            return;
        }
        self.frame = None;

        if let Some(index) = self.morph.update(&mut self.grid, now_ms, &mut self.rng) {
            self.resize_surface();
            self.cycle.on_morph_complete(index, &mut self.scheduler);
        }

        physics::step(self.grid.cells_mut(), self.pointer, &self.config.physics);

        self.draw();

        self.frame = Some(self.scheduler.request_frame());
    }

    /// A cycle timer fired at `now_ms`.
    pub fn on_timer(&mut self, handle: TimerHandle, now_ms: u64) {
        if !self.running {
            return;
        }
        if let Some(index) = self.cycle.on_timer(handle) {
            self.begin_morph(index, now_ms);
        }
    }

    /// Morph to the block at `index` right away, outside the cycle timer.
    ///
    /// Returns `false` when a morph is already running or the index is out of range.
    pub fn start_morph(&mut self, index: usize, now_ms: u64) -> bool {
        if !self.running || self.morph.is_active() {
            return false;
        }
        let in_range = self.style.as_ref().is_some_and(|s| index < s.blocks.len());
        if !in_range {
            return false;
        }
        self.cycle.begin(&mut self.scheduler);
        self.begin_morph(index, now_ms)
    }

    /// Morph to the next block in round-robin order right away.
    pub fn skip(&mut self, now_ms: u64) -> bool {
        if !self.cycle.enabled() {
            return false;
        }
        self.start_morph(self.cycle.next_index(), now_ms)
    }

    /// The pointer entered the surface.
    pub fn on_pointer_enter(&mut self) {
        if !self.running || self.cycle.is_hovering() {
            return;
        }
        self.cycle.on_hover_start(&mut self.scheduler);
    }

    /// The pointer moved to `(x, y)` in logical grid coordinates.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.on_pointer_enter();
        self.pointer = Pointer::new(x, y);
    }

    /// The pointer left the surface.
    pub fn on_pointer_leave(&mut self) {
        self.pointer = Pointer::FAR_AWAY;
        if !self.running || !self.cycle.is_hovering() {
            return;
        }
        self.cycle.on_hover_end(&mut self.scheduler);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn cycle(&self) -> &CycleScheduler {
        &self.cycle
    }

    pub fn morph_active(&self) -> bool {
        self.morph.is_active()
    }

    /// Block currently displayed (or being morphed away from).
    pub fn current_block(&self) -> Option<&ArtBlock> {
        self.style
            .as_ref()
            .and_then(|s| s.blocks.get(self.cycle.current_index()))
    }

    pub fn surface(&self) -> Option<&R> {
        self.surface.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn begin_morph(&mut self, index: usize, now_ms: u64) -> bool {
        let Some(target) = self.style.as_ref().and_then(|s| s.blocks.get(index)) else {
            return false;
        };
        self.morph.start(
            &self.grid,
            target,
            now_ms,
            self.config.morph.duration_ms,
            index,
        )
    }

    fn resize_surface(&mut self) {
        let size = self.grid.surface_size(self.config.density);
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size);
        }
    }

    fn draw(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.clear();
        for cell in self.grid.cells().iter().filter(|cell| !cell.is_blank()) {
            surface.draw_glyph(cell.glyph, cell.x, cell.y, &self.pen);
        }
    }
}

impl<R: Surface> GlyphEngine<ManualScheduler, R> {
    /// Deliver every callback due at `now_ms`.
    pub fn pump(&mut self, now_ms: u64) {
        for wakeup in self.scheduler.advance(now_ms) {
            match wakeup {
                Wakeup::Timer(handle) => self.on_timer(handle, now_ms),
                Wakeup::Frame(handle) => self.on_frame(handle, now_ms),
            }
        }
    }
}
