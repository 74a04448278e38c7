use std::time::{Duration, Instant};

/// Idle wait when nothing is pending.
const IDLE_WAIT: Duration = Duration::from_secs(86400);

/// Pure debouncer: only counts events and tracks the quiet period.
/// No filesystem access, no global state.
///
/// A zero window means every event is ready immediately, so each delivered
/// event maps to exactly one regeneration.
pub(super) struct Debouncer {
    window: Duration,
    pub(super) pending: usize,
    pub(super) last_event: Option<Instant>,
}

impl Debouncer {
    pub(super) fn new(window: Duration) -> Self {
        Self {
            window,
            pending: 0,
            last_event: None,
        }
    }

    pub(super) fn is_immediate(&self) -> bool {
        self.window.is_zero()
    }

    /// Record one relevant event.
    pub(super) fn add_event(&mut self) {
        self.add_event_at(Instant::now());
    }

    pub(super) fn add_event_at(&mut self, at: Instant) {
        self.pending += 1;
        self.last_event = Some(at);
    }

    /// Take the number of coalesced events once the window has been quiet.
    pub(super) fn take_if_ready(&mut self) -> Option<usize> {
        self.take_if_ready_at(Instant::now())
    }

    pub(super) fn take_if_ready_at(&mut self, now: Instant) -> Option<usize> {
        let last_event = self.last_event?;
        if now.saturating_duration_since(last_event) < self.window {
            return None;
        }

        self.last_event = None;
        Some(std::mem::take(&mut self.pending))
    }

    /// How long the event loop may block before checking again.
    pub(super) fn timeout(&self) -> Duration {
        match self.last_event {
            Some(last_event) => self.window.saturating_sub(last_event.elapsed()),
            None => IDLE_WAIT,
        }
    }
}
