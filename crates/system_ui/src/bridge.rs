//! Reactive bridge between a transition machine and Leptos signals/callbacks.
//!
//! The machine lives in a `RefCell`; every operation on it records lifecycle events into an
//! [`EventQueue`]. Once the borrow is released the bridge publishes a fresh
//! [`TransitionView`] and drains the queue into the caller's callbacks, so a callback is free
//! to toggle visibility again.

use leptos::*;
use transition_runtime::{
    EventQueue, PhaseScheduler, TransitionEvent, TransitionListener, TransitionMachine,
    TransitionStatus,
};

use crate::primitives::publish_if_changed;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Render-facing snapshot of one transition.
pub struct TransitionView {
    /// Current status.
    pub status: TransitionStatus,
    /// Full class attribute.
    pub class_list: String,
    /// Duration of the running animation, if any.
    pub duration_ms: Option<u32>,
    /// Whether the element belongs in the render tree.
    pub rendered: bool,
}

impl TransitionView {
    /// Captures the current state of `machine`.
    pub fn capture<S: PhaseScheduler, L: TransitionListener>(
        machine: &TransitionMachine<S, L>,
    ) -> Self {
        Self {
            status: machine.status(),
            class_list: machine.class_list(),
            duration_ms: machine.descriptor().map(|animation| animation.duration_ms),
            rendered: machine.should_render(),
        }
    }

    /// Inline style carrying the animation duration while animating.
    pub fn style(&self) -> Option<String> {
        self.duration_ms
            .map(|duration_ms| format!("animation-duration: {duration_ms}ms;"))
    }
}

#[derive(Clone, Copy)]
/// Signal and callback targets for one transition primitive.
pub struct TransitionBridge {
    /// Published view snapshot.
    pub view: RwSignal<TransitionView>,
    /// Called when an animation starts.
    pub on_start: Option<Callback<TransitionStatus>>,
    /// Called when an animation completes.
    pub on_complete: Option<Callback<TransitionStatus>>,
    /// Called when an enter animation completes.
    pub on_show: Option<Callback<TransitionStatus>>,
    /// Called when an exit animation completes.
    pub on_hide: Option<Callback<TransitionStatus>>,
}

impl TransitionBridge {
    /// Publishes `view` if it differs from the current snapshot.
    pub fn publish(&self, view: TransitionView) {
        publish_if_changed(self.view, view);
    }

    /// Drains `events` into the caller's callbacks in emission order.
    pub fn flush(&self, events: &EventQueue) {
        while let Some(event) = events.pop() {
            let (callback, status) = match event {
                TransitionEvent::StatusChanged(_) => continue,
                TransitionEvent::Started(status) => (self.on_start, status),
                TransitionEvent::Completed(status) => (self.on_complete, status),
                TransitionEvent::Shown(status) => (self.on_show, status),
                TransitionEvent::Hidden(status) => (self.on_hide, status),
            };
            if let Some(callback) = callback {
                callback.call(status);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;
    use transition_runtime::{ManualScheduler, TransitionConfig, TransitionRequest};

    use super::*;

    #[test]
    fn view_captures_status_classes_and_duration() {
        let mut machine = TransitionMachine::new(
            TransitionRequest::new(false).mount_on_show(true),
            TransitionConfig::new("fade").with_duration(200),
            ManualScheduler::new(),
            (),
        );
        let hidden = TransitionView::capture(&machine);
        assert_eq!(hidden.status, TransitionStatus::Unmounted);
        assert!(!hidden.rendered);
        assert_eq!(hidden.style(), None);

        machine.set_visible(true);
        let entering = TransitionView::capture(&machine);
        assert_eq!(
            entering,
            TransitionView {
                status: TransitionStatus::Entering,
                class_list: "ui-transition fade animating".to_string(),
                duration_ms: Some(200),
                rendered: true,
            }
        );
        assert_eq!(entering.style().as_deref(), Some("animation-duration: 200ms;"));
    }

    #[test]
    fn flush_calls_callbacks_in_order() {
        let runtime = create_runtime();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let record = |label: &'static str| {
            let seen = Rc::clone(&seen);
            Callback::new(move |status: TransitionStatus| seen.borrow_mut().push((label, status)))
        };

        let events = EventQueue::new();
        let mut machine = TransitionMachine::new(
            TransitionRequest::new(false),
            TransitionConfig::new("fade").with_duration(200),
            ManualScheduler::new(),
            events.clone(),
        );
        let bridge = TransitionBridge {
            view: create_rw_signal(TransitionView::capture(&machine)),
            on_start: Some(record("start")),
            on_complete: Some(record("complete")),
            on_show: Some(record("show")),
            on_hide: None,
        };

        machine.set_visible(true);
        bridge.publish(TransitionView::capture(&machine));
        bridge.flush(&events);
        assert_eq!(
            bridge.view.get_untracked().status,
            TransitionStatus::Entering
        );

        machine.advance(200);
        machine.set_visible(false);
        machine.advance(200);
        bridge.publish(TransitionView::capture(&machine));
        bridge.flush(&events);

        assert!(events.is_empty());
        assert_eq!(bridge.view.get_untracked().class_list, "ui-transition hidden");
        assert_eq!(
            *seen.borrow(),
            vec![
                ("start", TransitionStatus::Entering),
                ("complete", TransitionStatus::Entered),
                ("show", TransitionStatus::Entered),
                ("start", TransitionStatus::Exiting),
                ("complete", TransitionStatus::Exited),
            ]
        );
        runtime.dispose();
    }
}
