//! Glyph grid animation engine.
//!
//! A grid of monospace glyphs is drawn onto a [`Surface`] every frame. Each glyph is
//! pushed away from the pointer and pulled back to its rest position by a damped
//! spring, and every so often the whole text morphs into the next block of the
//! selected style through a per-cell glitch-then-resolve transition.
//!
//! [`GlyphEngine`] owns all state. Frame and timer callbacks come from an injected
//! [`Scheduler`]; [`ManualScheduler`] is a deterministic implementation used by the
//! terminal host and the tests.

mod chars;
mod cycle;
mod engine;
mod grid;
mod morph;
mod physics;
mod rng;
mod scheduler;
mod surface;

pub use chars::GLITCH_CHARS;
pub use cycle::{CyclePhase, CycleScheduler};
pub use engine::{EngineConfig, GlyphEngine};
pub use grid::{Cell, Grid, SurfaceSize};
pub use morph::{GLITCH_START, MorphController, threshold, thresholds_for};
pub use physics::{Pointer, step};
pub use rng::GlitchRng;
pub use scheduler::{FrameHandle, ManualScheduler, Scheduler, TimerHandle, Wakeup};
pub use surface::{BufferSurface, DrawnGlyph, Pen, RecordingSurface, Surface};
