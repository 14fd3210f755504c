//! Visibility transition state machine.
//!
//! ```text
//! UNMOUNTED -> EXITED <-> ENTERING -> ENTERED <-> EXITING -> EXITED | UNMOUNTED
//! ```
//!
//! `ENTERING`/`EXITING` hold exactly while a phase timer is pending and always rest in
//! `ENTERED`/`EXITED` (or `UNMOUNTED` under `unmount_on_hide`) when it fires. A visibility flip
//! mid-animation reverses immediately: the in-flight timer is cancelled and a fresh one armed.

use leptos::logging;

use crate::{
    descriptor::{resolve_animation, transition_class_list, AnimationDescriptor},
    listener::TransitionListener,
    model::{Direction, MountPolicy, TransitionConfig, TransitionRequest, TransitionStatus},
    mount::{resting_hidden_status, should_render},
    scheduler::ManualScheduler,
    timer::{PhaseScheduler, PhaseTimer, TimerHandle},
};

/// One element's transition state, phase timer, and listener.
///
/// Dropping the machine cancels any pending timer with its scheduler.
pub struct TransitionMachine<S: PhaseScheduler, L: TransitionListener = ()> {
    status: TransitionStatus,
    visible: bool,
    policy: MountPolicy,
    config: TransitionConfig,
    animation: Option<AnimationDescriptor>,
    timer: PhaseTimer,
    scheduler: S,
    listener: L,
}

impl<S: PhaseScheduler, L: TransitionListener> std::fmt::Debug for TransitionMachine<S, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionMachine")
            .field("status", &self.status)
            .field("visible", &self.visible)
            .field("policy", &self.policy)
            .field("config", &self.config)
            .field("animation", &self.animation)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl<S: PhaseScheduler, L: TransitionListener> TransitionMachine<S, L> {
    /// Creates a machine for `request`.
    ///
    /// A visible request with `transition_on_mount` starts entering right away, so `listener`
    /// sees `on_start(Entering)` before this returns. Otherwise the machine rests in `Entered`,
    /// or in `Unmounted`/`Exited` depending on the mount policy.
    pub fn new(
        request: TransitionRequest,
        config: TransitionConfig,
        scheduler: S,
        listener: L,
    ) -> Self {
        let status = if request.visible && !request.transition_on_mount {
            TransitionStatus::Entered
        } else if !request.visible && request.policy.is_gated() {
            TransitionStatus::Unmounted
        } else {
            TransitionStatus::Exited
        };

        let mut machine = Self {
            status,
            visible: request.visible,
            policy: request.policy,
            config,
            animation: None,
            timer: PhaseTimer::new(),
            scheduler,
            listener,
        };
        if request.visible && request.transition_on_mount {
            machine.start(Direction::Enter);
        }
        machine
    }

    /// Current status.
    pub fn status(&self) -> TransitionStatus {
        self.status
    }

    /// Last visibility supplied by the caller.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current mount policy.
    pub fn policy(&self) -> MountPolicy {
        self.policy
    }

    /// Config used by the next transition start.
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Descriptor of the running animation, if one is in flight.
    pub fn descriptor(&self) -> Option<&AnimationDescriptor> {
        self.animation.as_ref()
    }

    /// Live timer handle, if an animation is in flight.
    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.timer.live()
    }

    /// Returns whether the element belongs in the render tree.
    pub fn should_render(&self) -> bool {
        should_render(self.status, self.policy)
    }

    /// Class attribute for the current status.
    pub fn class_list(&self) -> String {
        transition_class_list(self.status, self.animation.as_ref())
    }

    /// Shared access to the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Exclusive access to the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Shared access to the listener.
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Exclusive access to the listener.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Replaces the config. A running animation keeps its descriptor and timer.
    pub fn set_config(&mut self, config: TransitionConfig) {
        self.config = config;
    }

    /// Replaces the mount policy. Takes effect at the next status commit.
    pub fn set_policy(&mut self, policy: MountPolicy) {
        self.policy = policy;
    }

    /// Applies a full caller update: policy first, then visibility.
    pub fn update(&mut self, request: TransitionRequest) {
        self.set_policy(request.policy);
        self.set_visible(request.visible);
    }

    /// Feeds a new visibility value.
    ///
    /// Resting in the requested state, or already animating towards it, is a no-op.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        match (self.status, visible) {
            (
                TransitionStatus::Exited | TransitionStatus::Unmounted | TransitionStatus::Exiting,
                true,
            ) => self.start(Direction::Enter),
            (TransitionStatus::Entered | TransitionStatus::Entering, false) => {
                self.start(Direction::Exit)
            }
            _ => {}
        }
    }

    /// Delivers a phase timer fire. Returns whether it advanced the machine.
    ///
    /// Stale handles from cancelled or superseded timers are ignored.
    pub fn timer_fired(&mut self, handle: TimerHandle) -> bool {
        if !self.timer.fire(handle) {
            logging::debug_warn!("ignoring stale transition {handle}");
            return false;
        }
        self.scheduler.release(handle);

        let completed = match self.status {
            TransitionStatus::Entering => TransitionStatus::Entered,
            TransitionStatus::Exiting => resting_hidden_status(self.policy),
            other => {
                logging::warn!(
                    "transition {handle} fired while resting in {}",
                    other.as_str()
                );
                return false;
            }
        };
        self.status = completed;
        self.animation = None;

        self.listener.on_status_change(completed);
        self.listener.on_complete(completed);
        if completed == TransitionStatus::Entered {
            self.listener.on_show(completed);
        } else {
            self.listener.on_hide(completed);
        }
        true
    }

    /// Cancels any pending timer and drops the machine.
    pub fn dispose(self) {}

    fn start(&mut self, direction: Direction) {
        let animation = resolve_animation(&self.config, direction);
        let status = animation.target;
        self.timer.arm(animation.duration_ms, &mut self.scheduler);
        self.status = status;
        self.animation = Some(animation);

        self.listener.on_status_change(status);
        self.listener.on_start(status);
    }
}

impl<L: TransitionListener> TransitionMachine<ManualScheduler, L> {
    /// Advances the virtual clock by `ms` and delivers every due fire. Returns how many advanced
    /// the machine.
    pub fn advance(&mut self, ms: u64) -> usize {
        let due = self.scheduler.advance(ms);
        due.into_iter()
            .filter(|handle| self.timer_fired(*handle))
            .count()
    }
}

impl<S: PhaseScheduler, L: TransitionListener> Drop for TransitionMachine<S, L> {
    fn drop(&mut self) {
        self.timer.cancel(&mut self.scheduler);
    }
}
