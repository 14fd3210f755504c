//! Lifecycle notifications emitted by the transition state machine.

use std::{cell::RefCell, collections::VecDeque, fmt, rc::Rc};

use crate::model::TransitionStatus;

/// Receives lifecycle notifications. Every method defaults to a no-op.
///
/// The machine commits the new status before calling any method, so a listener that panics
/// cannot leave it half-transitioned.
pub trait TransitionListener {
    /// Any status commit, including the ones reported by the other methods.
    fn on_status_change(&mut self, _status: TransitionStatus) {}

    /// An enter or exit animation started. Receives `Entering` or `Exiting`.
    fn on_start(&mut self, _status: TransitionStatus) {}

    /// An animation finished. Always followed by [`Self::on_show`] or [`Self::on_hide`].
    fn on_complete(&mut self, _status: TransitionStatus) {}

    /// An enter animation finished. Receives `Entered`.
    fn on_show(&mut self, _status: TransitionStatus) {}

    /// An exit animation finished. Receives `Exited` or `Unmounted`.
    fn on_hide(&mut self, _status: TransitionStatus) {}
}

impl TransitionListener for () {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Recorded lifecycle notification.
pub enum TransitionEvent {
    /// See [`TransitionListener::on_status_change`].
    StatusChanged(TransitionStatus),
    /// See [`TransitionListener::on_start`].
    Started(TransitionStatus),
    /// See [`TransitionListener::on_complete`].
    Completed(TransitionStatus),
    /// See [`TransitionListener::on_show`].
    Shown(TransitionStatus),
    /// See [`TransitionListener::on_hide`].
    Hidden(TransitionStatus),
}

impl TransitionEvent {
    /// Replays this event onto `listener`.
    pub fn dispatch(self, listener: &mut dyn TransitionListener) {
        match self {
            Self::StatusChanged(status) => listener.on_status_change(status),
            Self::Started(status) => listener.on_start(status),
            Self::Completed(status) => listener.on_complete(status),
            Self::Shown(status) => listener.on_show(status),
            Self::Hidden(status) => listener.on_hide(status),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Listener that records events for dispatch after the machine is no longer borrowed.
///
/// Clones share one queue.
pub struct EventQueue {
    inner: Rc<RefCell<VecDeque<TransitionEvent>>>,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the oldest event.
    pub fn pop(&self) -> Option<TransitionEvent> {
        self.inner.borrow_mut().pop_front()
    }

    /// Removes and returns all queued events in order.
    pub fn drain(&self) -> Vec<TransitionEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    /// Returns whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    fn push(&self, event: TransitionEvent) {
        self.inner.borrow_mut().push_back(event);
    }
}

impl TransitionListener for EventQueue {
    fn on_status_change(&mut self, status: TransitionStatus) {
        self.push(TransitionEvent::StatusChanged(status));
    }

    fn on_start(&mut self, status: TransitionStatus) {
        self.push(TransitionEvent::Started(status));
    }

    fn on_complete(&mut self, status: TransitionStatus) {
        self.push(TransitionEvent::Completed(status));
    }

    fn on_show(&mut self, status: TransitionStatus) {
        self.push(TransitionEvent::Shown(status));
    }

    fn on_hide(&mut self, status: TransitionStatus) {
        self.push(TransitionEvent::Hidden(status));
    }
}

type StatusCallback = Box<dyn FnMut(TransitionStatus)>;

#[derive(Default)]
/// Closure-backed listener with optional per-event callbacks.
pub struct TransitionCallbacks {
    on_status_change: Option<StatusCallback>,
    on_start: Option<StatusCallback>,
    on_complete: Option<StatusCallback>,
    on_show: Option<StatusCallback>,
    on_hide: Option<StatusCallback>,
}

impl fmt::Debug for TransitionCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionCallbacks")
            .field("on_status_change", &self.on_status_change.is_some())
            .field("on_start", &self.on_start.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .field("on_show", &self.on_show.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .finish()
    }
}

impl TransitionCallbacks {
    /// Creates a listener with no callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status-change callback.
    pub fn on_status_change(mut self, callback: impl FnMut(TransitionStatus) + 'static) -> Self {
        self.on_status_change = Some(Box::new(callback));
        self
    }

    /// Sets the start callback.
    pub fn on_start(mut self, callback: impl FnMut(TransitionStatus) + 'static) -> Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    /// Sets the completion callback.
    pub fn on_complete(mut self, callback: impl FnMut(TransitionStatus) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Sets the show callback.
    pub fn on_show(mut self, callback: impl FnMut(TransitionStatus) + 'static) -> Self {
        self.on_show = Some(Box::new(callback));
        self
    }

    /// Sets the hide callback.
    pub fn on_hide(mut self, callback: impl FnMut(TransitionStatus) + 'static) -> Self {
        self.on_hide = Some(Box::new(callback));
        self
    }
}

fn call(callback: &mut Option<StatusCallback>, status: TransitionStatus) {
    if let Some(callback) = callback.as_mut() {
        callback(status);
    }
}

impl TransitionListener for TransitionCallbacks {
    fn on_status_change(&mut self, status: TransitionStatus) {
        call(&mut self.on_status_change, status);
    }

    fn on_start(&mut self, status: TransitionStatus) {
        call(&mut self.on_start, status);
    }

    fn on_complete(&mut self, status: TransitionStatus) {
        call(&mut self.on_complete, status);
    }

    fn on_show(&mut self, status: TransitionStatus) {
        call(&mut self.on_show, status);
    }

    fn on_hide(&mut self, status: TransitionStatus) {
        call(&mut self.on_hide, status);
    }
}
