//! Timer-driven cycling through the blocks of a style.

use glyphwave_core::CycleParams;
use tracing::{debug, trace};

use crate::scheduler::{Scheduler, TimerHandle};

/// Whether a morph is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Morphing,
}

/// Decides when the next morph starts.
///
/// Pauses between morphs grow by a fixed step after every completed morph, up to a
/// cap. Hovering the pointer over the grid holds back the next morph without
/// interrupting one already running.
#[derive(Debug)]
pub struct CycleScheduler {
    params: CycleParams,
    block_count: usize,
    current_index: usize,
    next_pause_ms: u64,
    pending: Option<TimerHandle>,
    morphing: bool,
    hovering: bool,
}

impl CycleScheduler {
    pub fn new(params: CycleParams, block_count: usize) -> Self {
        Self {
            params,
            block_count,
            current_index: 0,
            next_pause_ms: params.initial_delay_ms,
            pending: None,
            morphing: false,
            hovering: false,
        }
    }

    /// Cycling needs at least two blocks.
    pub fn enabled(&self) -> bool {
        self.block_count > 1
    }

    pub fn phase(&self) -> CyclePhase {
        if self.morphing {
            CyclePhase::Morphing
        } else {
            CyclePhase::Idle
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn next_pause_ms(&self) -> u64 {
        self.next_pause_ms
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Block the next morph goes to.
    pub fn next_index(&self) -> usize {
        if self.block_count == 0 {
            0
        } else {
            (self.current_index + 1) % self.block_count
        }
    }

    /// Schedule the next morph after the current pause, replacing any pending timer.
    pub fn arm<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.cancel(scheduler);
        if !self.enabled() || self.morphing || self.hovering {
            return;
        }
        self.pending = Some(scheduler.set_timer(self.next_pause_ms));
        trace!(pause_ms = self.next_pause_ms, "cycle timer armed");
    }

    /// Drop the pending timer, if any.
    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_timer(handle);
        }
    }

    /// Handle a fired timer. Returns the block to morph to when a morph should start.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Option<usize> {
        if self.pending != Some(handle) {
            return None;
        }
        self.pending = None;
        if self.hovering || self.morphing {
            debug!("cycle timer suppressed");
            return None;
        }
        self.morphing = true;
        Some(self.next_index())
    }

    /// Enter the morphing phase outside the timer, for a morph requested by the host.
    pub fn begin<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.cancel(scheduler);
        self.morphing = true;
    }

    /// A morph to `index` finished: back to idle with a longer pause.
    pub fn on_morph_complete<S: Scheduler>(&mut self, index: usize, scheduler: &mut S) {
        self.current_index = index;
        self.morphing = false;
        self.next_pause_ms = self.params.grow(self.next_pause_ms);
        debug!(index, next_pause_ms = self.next_pause_ms, "cycle advanced");
        self.arm(scheduler);
    }

    pub fn on_hover_start<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.hovering = true;
        self.cancel(scheduler);
    }

    pub fn on_hover_end<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.hovering = false;
        if !self.morphing {
            self.arm(scheduler);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ManualScheduler, Wakeup};

    fn params() -> CycleParams {
        CycleParams {
            initial_delay_ms: 1000,
            step_ms: 500,
            max_pause_ms: 1800,
        }
    }

    fn fire(cycle: &mut CycleScheduler, sched: &mut ManualScheduler, now: u64) -> Option<usize> {
        sched
            .advance(now)
            .into_iter()
            .filter_map(|w| match w {
                Wakeup::Timer(h) => cycle.on_timer(h),
                Wakeup::Frame(_) => None,
            })
            .next()
    }

    #[test]
    fn test_single_block_never_arms() {
        let mut sched = ManualScheduler::new();
        let mut cycle = CycleScheduler::new(params(), 1);
        cycle.arm(&mut sched);
        assert!(cycle.pending().is_none());
        assert_eq!(sched.pending_timers(), 0);
    }

    #[test]
    fn test_round_robin_with_growing_pause() {
        let mut sched = ManualScheduler::new();
        let mut cycle = CycleScheduler::new(params(), 3);
        cycle.arm(&mut sched);

        assert_eq!(fire(&mut cycle, &mut sched, 999), None);
        assert_eq!(fire(&mut cycle, &mut sched, 1000), Some(1));
        assert_eq!(cycle.phase(), CyclePhase::Morphing);
        cycle.on_morph_complete(1, &mut sched);
        assert_eq!(cycle.next_pause_ms(), 1500);
        assert_eq!(sched.next_deadline(), Some(2500));

        assert_eq!(fire(&mut cycle, &mut sched, 2500), Some(2));
        cycle.on_morph_complete(2, &mut sched);
        assert_eq!(cycle.next_pause_ms(), 1800);
        assert_eq!(fire(&mut cycle, &mut sched, 4300), Some(0));
    }

    #[test]
    fn test_hover_in_idle_gap_suppresses_until_leave() {
        let mut sched = ManualScheduler::new();
        let mut cycle = CycleScheduler::new(params(), 2);
        cycle.arm(&mut sched);
        sched.advance(400);
        cycle.on_hover_start(&mut sched);
        assert_eq!(fire(&mut cycle, &mut sched, 5000), None);

        cycle.on_hover_end(&mut sched);
        assert_eq!(sched.next_deadline(), Some(6000));
        assert_eq!(fire(&mut cycle, &mut sched, 6000), Some(1));
    }

    #[test]
    fn test_hover_during_morph_waits_for_leave() {
        let mut sched = ManualScheduler::new();
        let mut cycle = CycleScheduler::new(params(), 2);
        cycle.arm(&mut sched);
        assert_eq!(fire(&mut cycle, &mut sched, 1000), Some(1));

        cycle.on_hover_start(&mut sched);
        assert_eq!(cycle.phase(), CyclePhase::Morphing);
        cycle.on_morph_complete(1, &mut sched);
        assert_eq!(cycle.phase(), CyclePhase::Idle);
        assert!(cycle.pending().is_none());

        cycle.on_hover_end(&mut sched);
        assert!(cycle.pending().is_some());
        assert_eq!(fire(&mut cycle, &mut sched, 2500), Some(0));
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut sched = ManualScheduler::new();
        let mut cycle = CycleScheduler::new(params(), 2);
        cycle.arm(&mut sched);
        let old = cycle.pending().unwrap();
        cycle.arm(&mut sched);
        assert_eq!(sched.pending_timers(), 1);
        assert_eq!(cycle.on_timer(old), None);
    }
}
