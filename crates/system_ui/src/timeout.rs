//! Browser-timeout backed [`PhaseScheduler`].

use std::{collections::HashMap, fmt, rc::Rc, time::Duration};

use leptos::{
    leptos_dom::helpers::TimeoutHandle, logging, queue_microtask, set_timeout_with_handle,
};
use transition_runtime::{PhaseScheduler, TimerHandle};

/// Schedules phase timers with `setTimeout` and hands fires to `sink`.
///
/// The sink is expected to hold only a weak reference to the timer owner, so a timeout that
/// outlives its component finds nothing to deliver to. When the browser refuses a timeout the
/// fire is queued as a microtask instead, so the animation still settles.
pub struct TimeoutScheduler {
    sink: Rc<dyn Fn(TimerHandle)>,
    pending: HashMap<TimerHandle, TimeoutHandle>,
}

impl fmt::Debug for TimeoutScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeoutScheduler")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl TimeoutScheduler {
    /// Creates a scheduler delivering fires to `sink`.
    pub fn new(sink: impl Fn(TimerHandle) + 'static) -> Self {
        Self {
            sink: Rc::new(sink),
            pending: HashMap::new(),
        }
    }

    /// Number of timeouts still waiting to fire.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Delivers `handle` after the current task without a browser timeout. A cancelled handle
    /// still reaches the sink and is rejected there as stale.
    fn deliver_soon(&self, handle: TimerHandle) {
        let sink = Rc::clone(&self.sink);
        queue_microtask(move || sink(handle));
    }
}

impl PhaseScheduler for TimeoutScheduler {
    fn schedule(&mut self, handle: TimerHandle, delay_ms: u32) {
        let sink = Rc::clone(&self.sink);
        match set_timeout_with_handle(
            move || sink(handle),
            Duration::from_millis(u64::from(delay_ms)),
        ) {
            Ok(timeout) => {
                self.pending.insert(handle, timeout);
            }
            Err(err) => {
                logging::warn!("transition {handle} timeout scheduling failed: {err:?}");
                self.deliver_soon(handle);
            }
        }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(timeout) = self.pending.remove(&handle) {
            timeout.clear();
        }
    }

    fn release(&mut self, handle: TimerHandle) {
        self.pending.remove(&handle);
    }
}

impl Drop for TimeoutScheduler {
    fn drop(&mut self) {
        for (_, timeout) in self.pending.drain() {
            timeout.clear();
        }
    }
}
