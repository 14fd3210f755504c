use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use leptos::*;
use transition_runtime::{
    AnimationName, EventQueue, TimerHandle, TransitionDuration, TransitionMachine,
    TransitionRequest, TransitionStatus,
};

use super::{bool_token, config_from_props, merge_layout_class};
use crate::{
    bridge::{TransitionBridge, TransitionView},
    timeout::TimeoutScheduler,
};

type Machine = TransitionMachine<TimeoutScheduler, EventQueue>;
type MachineSlot = Rc<RefCell<Option<Machine>>>;

/// Runs `op` on the live machine, then publishes its view and flushes callbacks after the
/// borrow is released. Does nothing once the component has been cleaned up.
fn with_machine(
    slot: &MachineSlot,
    events: &EventQueue,
    bridge: TransitionBridge,
    op: impl FnOnce(&mut Machine),
) {
    let view = {
        let Ok(mut guard) = slot.try_borrow_mut() else {
            logging::warn!("transition machine re-entered while busy");
            return;
        };
        let Some(machine) = guard.as_mut() else {
            return;
        };
        op(machine);
        TransitionView::capture(machine)
    };
    bridge.publish(view);
    bridge.flush(events);
}

/// Timeout sink for one component. Holds the slot weakly so fires after cleanup are dropped.
fn timeout_sink(
    slot: Weak<RefCell<Option<Machine>>>,
    events: EventQueue,
    bridge: TransitionBridge,
) -> impl Fn(TimerHandle) {
    move |handle| {
        let Some(slot) = slot.upgrade() else {
            return;
        };
        with_machine(&slot, &events, bridge, |machine| {
            machine.timer_fired(handle);
        });
    }
}

#[component]
/// Animates its children in and out as `visible` changes.
///
/// The wrapper carries `ui-transition` plus the running animation's class (for example
/// `fade-in animating`) while animating, and `visible`/`hidden` at rest. With `mount_on_show`
/// or `unmount_on_hide` the wrapper is removed from the DOM while unmounted.
pub fn Transition(
    /// Layout-only class hook for app-specific placement.
    #[prop(optional)]
    layout_class: Option<&'static str>,
    /// Show the content; flipping it starts the enter or exit animation.
    #[prop(into)]
    visible: MaybeSignal<bool>,
    /// Named animation, or an enter/exit pair. Defaults to `fade`.
    #[prop(optional, into)]
    animation: Option<AnimationName>,
    /// Whether the animation has distinct `-in`/`-out` keyframes. Defaults to the catalog entry.
    #[prop(optional)]
    directional: Option<bool>,
    /// Duration in milliseconds, or a show/hide pair. Defaults to 500ms.
    #[prop(optional, into)]
    duration: Option<TransitionDuration>,
    /// Wait for the first enter before mounting the content.
    #[prop(optional)]
    mount_on_show: bool,
    /// Unmount the content once an exit completes.
    #[prop(optional)]
    unmount_on_hide: bool,
    /// Run the enter animation on mount when initially visible.
    #[prop(optional)]
    transition_on_mount: bool,
    /// Called with `ENTERING`/`EXITING` when an animation starts.
    #[prop(optional)]
    on_start: Option<Callback<TransitionStatus>>,
    /// Called when any animation completes, right before `on_show`/`on_hide`.
    #[prop(optional)]
    on_complete: Option<Callback<TransitionStatus>>,
    /// Called when an enter animation completes.
    #[prop(optional)]
    on_show: Option<Callback<TransitionStatus>>,
    /// Called when an exit animation completes.
    #[prop(optional)]
    on_hide: Option<Callback<TransitionStatus>>,
    /// Animated content.
    children: ChildrenFn,
) -> impl IntoView {
    let request = TransitionRequest::new(visible.get_untracked())
        .mount_on_show(mount_on_show)
        .unmount_on_hide(unmount_on_hide)
        .transition_on_mount(transition_on_mount);
    let config = config_from_props(animation, directional, duration);

    let events = EventQueue::new();
    let slot: MachineSlot = Rc::new(RefCell::new(None));
    let placeholder = TransitionView {
        status: TransitionStatus::Exited,
        class_list: String::new(),
        duration_ms: None,
        rendered: false,
    };
    let bridge = TransitionBridge {
        view: create_rw_signal(placeholder),
        on_start,
        on_complete,
        on_show,
        on_hide,
    };

    let scheduler = TimeoutScheduler::new(timeout_sink(
        Rc::downgrade(&slot),
        events.clone(),
        bridge,
    ));
    let machine = TransitionMachine::new(request, config, scheduler, events.clone());
    let initial = TransitionView::capture(&machine);
    *slot.borrow_mut() = Some(machine);
    bridge.publish(initial);
    bridge.flush(&events);

    {
        let slot = Rc::clone(&slot);
        let events = events.clone();
        create_effect(move |previous: Option<bool>| {
            let next = visible.get();
            if previous.is_some_and(|previous| previous != next) {
                with_machine(&slot, &events, bridge, |machine| machine.set_visible(next));
            }
            next
        });
    }

    on_cleanup(move || {
        let disposed = slot.try_borrow_mut().ok().and_then(|mut guard| guard.take());
        if let Some(machine) = disposed {
            machine.dispose();
        }
    });

    let snapshot = bridge.view;
    let children = store_value(children);
    view! {
        <Show when=move || snapshot.with(|current| current.rendered) fallback=|| ()>
            <div
                class=move || {
                    snapshot.with(|current| merge_layout_class(current.class_list.clone(), layout_class))
                }
                style=move || snapshot.with(TransitionView::style)
                data-ui-primitive="true"
                data-ui-kind="transition"
                data-ui-state=move || snapshot.with(|current| current.status.as_str())
                data-ui-animating=move || {
                    snapshot.with(|current| bool_token(current.status.is_transient()))
                }
            >
                {children.with_value(|children| children())}
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use transition_runtime::{PhaseTimer, TransitionConfig};

    use super::*;

    fn hidden_machine(events: &EventQueue) -> Machine {
        TransitionMachine::new(
            TransitionRequest::new(false),
            TransitionConfig::new("fade"),
            TimeoutScheduler::new(|_| {}),
            events.clone(),
        )
    }

    fn bridge() -> TransitionBridge {
        TransitionBridge {
            view: create_rw_signal(TransitionView {
                status: TransitionStatus::Entered,
                class_list: String::new(),
                duration_ms: None,
                rendered: true,
            }),
            on_start: None,
            on_complete: None,
            on_show: None,
            on_hide: None,
        }
    }

    #[test]
    fn live_slot_publishes_the_machine_view() {
        let runtime = create_runtime();
        let events = EventQueue::new();
        let bridge = bridge();
        let slot: MachineSlot = Rc::new(RefCell::new(Some(hidden_machine(&events))));

        with_machine(&slot, &events, bridge, |_| {});

        assert_eq!(bridge.view.get_untracked().class_list, "ui-transition hidden");
        runtime.dispose();
    }

    #[test]
    fn fires_after_cleanup_are_dropped() {
        let runtime = create_runtime();
        let events = EventQueue::new();
        let bridge = bridge();
        let before = bridge.view.get_untracked();
        let slot: MachineSlot = Rc::new(RefCell::new(Some(hidden_machine(&events))));
        let handle = PhaseTimer::new().arm(0, &mut transition_runtime::NoopScheduler);

        // Emptied slot: the component ran its cleanup but still owns the Rc.
        let disposed = slot.borrow_mut().take();
        drop(disposed);
        let mut touched = false;
        with_machine(&slot, &events, bridge, |_| touched = true);
        assert!(!touched);
        timeout_sink(Rc::downgrade(&slot), events.clone(), bridge)(handle);

        // Dropped slot: the weak upgrade fails.
        let sink = timeout_sink(Rc::downgrade(&slot), events.clone(), bridge);
        drop(slot);
        sink(handle);

        assert_eq!(bridge.view.get_untracked(), before);
        assert!(events.is_empty());
        runtime.dispose();
    }
}
