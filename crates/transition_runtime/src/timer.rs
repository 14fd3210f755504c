//! Single-shot phase timer marking the end of a transition animation.
//!
//! The timer itself never sleeps. It hands deadlines to a host [`PhaseScheduler`] and later
//! accepts the fire back through [`PhaseTimer::fire`], which rejects anything but the one live
//! handle. A cancelled or superseded handle can therefore never advance the state machine, even
//! if the host delivers it late.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Opaque id of one armed timer.
pub struct TimerHandle(u64);

impl TimerHandle {
    #[cfg(test)]
    pub(crate) const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Raw id, for host bookkeeping.
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Host service that turns a deadline into a later call to the timer owner.
///
/// Implementations must never deliver a fire from inside [`PhaseScheduler::schedule`]; a zero
/// delay is deferred to the next scheduling opportunity like any other.
pub trait PhaseScheduler {
    /// Requests that `handle` be delivered back after `delay_ms`.
    fn schedule(&mut self, handle: TimerHandle, delay_ms: u32);

    /// Drops a pending delivery of `handle`. Unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Called once `handle` has been delivered and accepted.
    fn release(&mut self, _handle: TimerHandle) {}
}

#[derive(Debug, Default)]
/// Owner-side timer state: at most one live handle.
pub struct PhaseTimer {
    live: Option<TimerHandle>,
    next_id: u64,
}

impl PhaseTimer {
    /// Creates an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any live handle, then schedules a new one.
    pub fn arm(&mut self, delay_ms: u32, scheduler: &mut dyn PhaseScheduler) -> TimerHandle {
        self.cancel(scheduler);
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.live = Some(handle);
        scheduler.schedule(handle, delay_ms);
        handle
    }

    /// Cancels the live handle, if any, and returns it.
    pub fn cancel(&mut self, scheduler: &mut dyn PhaseScheduler) -> Option<TimerHandle> {
        let handle = self.live.take()?;
        scheduler.cancel(handle);
        Some(handle)
    }

    /// Accepts a delivered fire. Returns `false` for stale or unknown handles.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.live == Some(handle) {
            self.live = None;
            true
        } else {
            false
        }
    }

    /// Currently live handle.
    pub fn live(&self) -> Option<TimerHandle> {
        self.live
    }

    /// Returns whether a fire is pending.
    pub fn is_pending(&self) -> bool {
        self.live.is_some()
    }
}
