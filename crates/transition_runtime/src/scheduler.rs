//! Headless [`PhaseScheduler`] implementations.

use crate::timer::{PhaseScheduler, TimerHandle};

#[derive(Debug, Clone, Copy, Default)]
/// Scheduler that never fires. Used for static rendering where animations never complete.
pub struct NoopScheduler;

impl PhaseScheduler for NoopScheduler {
    fn schedule(&mut self, _handle: TimerHandle, _delay_ms: u32) {}

    fn cancel(&mut self, _handle: TimerHandle) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingFire {
    due_ms: u64,
    seq: u64,
    handle: TimerHandle,
}

#[derive(Debug, Clone, Default)]
/// Virtual-clock scheduler driven explicitly by [`ManualScheduler::advance`].
pub struct ManualScheduler {
    now_ms: u64,
    seq: u64,
    pending: Vec<PendingFire>,
}

impl ManualScheduler {
    /// Creates a scheduler with its clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Returns whether `handle` is still waiting to fire.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|fire| fire.handle == handle)
    }

    /// Number of pending fires.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.pending.iter().map(|fire| fire.due_ms).min()
    }

    /// Moves the clock forward by `ms` and returns every handle now due, earliest first.
    ///
    /// `advance(0)` delivers zero-delay fires scheduled since the last call.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerHandle> {
        self.now_ms += ms;
        let now_ms = self.now_ms;
        let mut due: Vec<PendingFire> = Vec::new();
        self.pending.retain(|fire| {
            if fire.due_ms <= now_ms {
                due.push(*fire);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|fire| (fire.due_ms, fire.seq));
        due.into_iter().map(|fire| fire.handle).collect()
    }
}

impl PhaseScheduler for ManualScheduler {
    fn schedule(&mut self, handle: TimerHandle, delay_ms: u32) {
        self.seq += 1;
        self.pending.push(PendingFire {
            due_ms: self.now_ms + u64::from(delay_ms),
            seq: self.seq,
            handle,
        });
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|fire| fire.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::timer::PhaseTimer;

    #[test]
    fn advance_returns_due_handles_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        let slow_handle = TimerHandle::from_raw(1);
        let fast_handle = TimerHandle::from_raw(2);

        scheduler.schedule(slow_handle, 300);
        scheduler.schedule(fast_handle, 100);

        assert_eq!(scheduler.next_deadline_ms(), Some(100));
        assert!(scheduler.advance(99).is_empty());
        assert_eq!(scheduler.advance(250), vec![fast_handle, slow_handle]);
        assert_eq!(scheduler.now_ms(), 349);
        assert_eq!(scheduler.pending_len(), 0);
    }

    #[test]
    fn zero_delay_is_deferred_until_the_next_advance() {
        let mut scheduler = ManualScheduler::new();
        let mut timer = PhaseTimer::new();

        let handle = timer.arm(0, &mut scheduler);

        assert!(scheduler.is_pending(handle));
        assert_eq!(scheduler.advance(0), vec![handle]);
        assert!(!scheduler.is_pending(handle));
    }
}
