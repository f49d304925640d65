//! Frame and timer scheduling capability injected into the engine.

/// Identifies a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Identifies a delayed callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Source of frame callbacks and delayed timer callbacks.
///
/// The host delivers due callbacks back to the engine through
/// [`GlyphEngine::on_frame`](crate::GlyphEngine::on_frame) and
/// [`GlyphEngine::on_timer`](crate::GlyphEngine::on_timer).
pub trait Scheduler {
    /// Ask for one callback at the next display refresh.
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Ask for one callback after `delay_ms`.
    fn set_timer(&mut self, delay_ms: u64) -> TimerHandle;
    fn cancel_timer(&mut self, handle: TimerHandle);
}

/// A callback that has become due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    Timer(TimerHandle),
    Frame(FrameHandle),
}

/// Deterministic scheduler advanced explicitly by the host loop.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    frame: Option<FrameHandle>,
    timers: Vec<(TimerHandle, u64)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler whose clock already reads `now_ms`.
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn frame_pending(&self) -> bool {
        self.frame.is_some()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest timer deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.iter().map(|(_, deadline)| *deadline).min()
    }

    /// Move the clock to `now_ms` and collect due callbacks.
    ///
    /// Due timers come first in deadline order, followed by the pending frame.
    pub fn advance(&mut self, now_ms: u64) -> Vec<Wakeup> {
        self.now_ms = self.now_ms.max(now_ms);
        let now = self.now_ms;

        let mut due: Vec<(TimerHandle, u64)> = Vec::new();
        self.timers.retain(|&(handle, deadline)| {
            if deadline <= now {
                due.push((handle, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(handle, deadline)| (deadline, handle.0));

        let mut wakeups: Vec<Wakeup> = due.into_iter().map(|(h, _)| Wakeup::Timer(h)).collect();
        if let Some(frame) = self.frame.take() {
            wakeups.push(Wakeup::Frame(frame));
        }
        wakeups
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        if let Some(frame) = self.frame {
            return frame;
        }
        let frame = FrameHandle(self.next_id());
        self.frame = Some(frame);
        frame
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.frame == Some(handle) {
            self.frame = None;
        }
    }

    fn set_timer(&mut self, delay_ms: u64) -> TimerHandle {
        let handle = TimerHandle(self.next_id());
        self.timers.push((handle, self.now_ms.saturating_add(delay_ms)));
        handle
    }

    fn cancel_timer(&mut self, handle: TimerHandle) {
        self.timers.retain(|(h, _)| *h != handle);
    }
}
