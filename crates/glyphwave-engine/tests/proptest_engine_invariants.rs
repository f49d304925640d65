//! Property-based invariants of the glyph engine.
//!
//! 1. Grid shape: rows x longest line, padding is blank.
//! 2. Rebuild leaves every cell at rest with zero velocity.
//! 3. Thresholds are deterministic and inside (0.15, 0.85).
//! 4. Without a pointer every cell converges back to rest.
//! 5. A stationary pointer inside the radius settles at a fixed nonzero offset.
//! 6. The n-th cycle pause is min(I + (n - 1) * S, M).

use glyphwave_core::{ArtBlock, BLANK, CellMetrics, CycleParams, PhysicsParams, Style};
use glyphwave_engine::{
    CycleScheduler, EngineConfig, GlitchRng, GlyphEngine, Grid, ManualScheduler, Pointer,
    RecordingSurface, Scheduler, Wakeup, step, thresholds_for,
};
use proptest::prelude::*;
use ratatui::style::Color;

// ── Helpers ─────────────────────────────────────────────────────────────

fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[A-Za-z#@ ]{0,12}", 1..8)
}

fn block_strategy() -> impl Strategy<Value = ArtBlock> {
    lines_strategy().prop_map(ArtBlock::from_lines)
}

fn offset_len(grid: &Grid) -> f32 {
    grid.cells()
        .iter()
        .map(|c| {
            let (ox, oy) = c.offset();
            (ox * ox + oy * oy).sqrt()
        })
        .fold(0.0, f32::max)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Grid shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn grid_has_one_cell_per_position(lines in lines_strategy()) {
        let block = ArtBlock::from_lines(&lines);
        let grid = Grid::build(&block, CellMetrics::default());
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        prop_assert_eq!(grid.len(), lines.len() * width);
        for (row, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            for col in len..width {
                prop_assert_eq!(grid.cell(row, col).map(|c| c.glyph), Some(BLANK));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Rebuild resets motion
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rebuild_puts_cells_at_rest(
        first in block_strategy(),
        second in block_strategy(),
        px in -50.0f32..150.0,
        py in -50.0f32..100.0,
    ) {
        let mut grid = Grid::build(&first, CellMetrics::default());
        for _ in 0..10 {
            step(grid.cells_mut(), Pointer::new(px, py), &PhysicsParams::default());
        }
        grid.rebuild(&second);
        for cell in grid.cells() {
            prop_assert_eq!(cell.x, cell.rest_x);
            prop_assert_eq!(cell.y, cell.rest_y);
            prop_assert_eq!((cell.vx, cell.vy), (0.0, 0.0));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Thresholds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn thresholds_are_deterministic_and_bounded(rows in 0usize..30, cols in 0usize..80) {
        let a = thresholds_for(rows, cols);
        let b = thresholds_for(rows, cols);
        prop_assert_eq!(a.len(), rows * cols);
        prop_assert_eq!(&a, &b);
        prop_assert!(a.iter().all(|t| *t > 0.15 && *t < 0.85));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Convergence to rest
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cells_return_to_rest_without_pointer(
        block in block_strategy(),
        px in 0.0f32..100.0,
        py in 0.0f32..100.0,
        frames in 1usize..60,
    ) {
        let params = PhysicsParams::default();
        let mut grid = Grid::build(&block, CellMetrics::default());
        for _ in 0..frames {
            step(grid.cells_mut(), Pointer::new(px, py), &params);
        }
        for _ in 0..500 {
            step(grid.cells_mut(), Pointer::FAR_AWAY, &params);
        }
        prop_assert!(offset_len(&grid) < 1e-3);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Equilibrium under a stationary pointer
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn stationary_pointer_gives_fixed_offset(
        dx in 1.0f32..60.0,
        dy in -40.0f32..40.0,
    ) {
        let params = PhysicsParams::default();
        let mut grid = Grid::build(&ArtBlock::parse("A"), CellMetrics::default());
        let pointer = Pointer::new(-dx, dy);
        let dist = (dx * dx + dy * dy).sqrt();
        prop_assume!(dist < params.repel_radius);

        for _ in 0..600 {
            step(grid.cells_mut(), pointer, &params);
        }
        let settled = grid.cells()[0].offset();
        step(grid.cells_mut(), pointer, &params);
        let next = grid.cells()[0].offset();

        let force = (1.0 - dist / params.repel_radius) * params.repel_strength;
        let expected = (dx / dist * force / params.spring, -dy / dist * force / params.spring);
        prop_assert!((settled.0 - expected.0).abs() < 1e-2);
        prop_assert!((settled.1 - expected.1).abs() < 1e-2);
        prop_assert!((next.0 - settled.0).abs() < 1e-3 && (next.1 - settled.1).abs() < 1e-3);
        prop_assert!(settled.0 > 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Pause sequence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pause_sequence_is_capped_linear(
        initial in 100u64..5000,
        step_ms in 0u64..3000,
        extra in 0u64..20000,
        morphs in 1u32..12,
    ) {
        let params = CycleParams {
            initial_delay_ms: initial,
            step_ms,
            max_pause_ms: initial + extra,
        };
        let mut sched = ManualScheduler::new();
        let mut cycle = CycleScheduler::new(params, 3);
        cycle.arm(&mut sched);

        let mut armed_at = 0;
        for n in 1..=morphs {
            let expected = (initial + u64::from(n - 1) * step_ms).min(initial + extra);
            prop_assert_eq!(sched.next_deadline(), Some(armed_at + expected));

            let fired = sched.advance(armed_at + expected);
            let handle = match fired.as_slice() {
                [Wakeup::Timer(h)] => *h,
                other => return Err(TestCaseError::fail(format!("unexpected {other:?}"))),
            };
            let index = cycle.on_timer(handle);
            prop_assert!(index.is_some());
            armed_at += expected;
            cycle.on_morph_complete(index.unwrap_or_default(), &mut sched);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// Concrete cases
// ═════════════════════════════════════════════════════════════════════════

fn two_block_engine(duration_ms: u64) -> GlyphEngine<ManualScheduler, RecordingSurface> {
    let mut config = EngineConfig::default();
    config.morph.duration_ms = duration_ms;
    config.cycle = CycleParams {
        initial_delay_ms: 1000,
        step_ms: 1000,
        max_pause_ms: 5000,
    };
    let style = Style::new(
        "pair",
        vec![ArtBlock::parse("AB\nCD"), ArtBlock::parse("XY\nZW")],
    );
    GlyphEngine::new(
        config,
        Some(style),
        Color::Yellow,
        ManualScheduler::new(),
        RecordingSurface::new(),
        GlitchRng::new(2024),
    )
}

#[test]
fn morph_to_xyzw_at_full_progress() {
    let mut engine = two_block_engine(600);
    engine.start();
    engine.pump(0);
    engine.pump(1000);
    assert!(engine.morph_active());
    engine.pump(1600);
    assert_eq!(engine.grid().text(), "XY\nZW");

    let drawn: String = engine
        .surface()
        .map(|s| s.glyphs.iter().map(|g| g.glyph).collect())
        .unwrap_or_default();
    assert_eq!(drawn, "XYZW");
    assert!(
        engine
            .surface()
            .is_some_and(|s| s.glyphs.iter().all(|g| g.color == Color::Yellow))
    );
}

#[test]
fn morph_start_shows_original_glyphs() {
    let mut engine = two_block_engine(600);
    engine.start();
    engine.pump(1000);
    assert!(engine.morph_active());
    assert_eq!(engine.grid().text(), "AB\nCD");
}

#[test]
fn hover_mid_morph_does_not_interrupt() {
    let mut engine = two_block_engine(600);
    engine.start();
    engine.pump(1000);
    engine.on_pointer_move(3.0, 3.0);
    engine.pump(1300);
    assert!(engine.morph_active());
    engine.pump(1600);
    assert!(!engine.morph_active());
    assert_eq!(engine.cycle().current_index(), 1);
    // Still hovering: nothing armed until the pointer leaves.
    assert_eq!(engine.scheduler().pending_timers(), 0);
    engine.on_pointer_leave();
    assert_eq!(engine.scheduler().pending_timers(), 1);
}

#[test]
fn physics_keeps_running_during_morph() {
    let mut engine = two_block_engine(600);
    engine.start();
    engine.pump(1000);
    engine.on_pointer_move(-4.0, 0.0);
    engine.pump(1016);
    let moved = engine.grid().cells().iter().any(|c| c.offset() != (0.0, 0.0));
    assert!(moved);
    assert!(engine.morph_active());
}

#[test]
fn stray_timer_is_ignored() {
    let mut sched = ManualScheduler::new();
    let mut cycle = CycleScheduler::new(CycleParams::default(), 2);
    cycle.arm(&mut sched);
    let stray = sched.set_timer(0);
    assert_eq!(cycle.on_timer(stray), None);
}
