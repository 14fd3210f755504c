//! Transition status, animation configuration, and mount policy types.

use serde::{Deserialize, Serialize};

use crate::catalog::AnimationCatalog;

/// Animation used when a caller does not name one.
pub const DEFAULT_ANIMATION: &str = "fade";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// Current phase of a visibility transition.
pub enum TransitionStatus {
    /// Element is not part of the render tree.
    Unmounted,
    /// Element is hidden and at rest.
    Exited,
    /// Enter animation is running.
    Entering,
    /// Element is shown and at rest.
    Entered,
    /// Exit animation is running.
    Exiting,
}

impl Default for TransitionStatus {
    fn default() -> Self {
        Self::Exited
    }
}

impl TransitionStatus {
    /// Returns the stable upper-case token used in DOM attributes and diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unmounted => "UNMOUNTED",
            Self::Exited => "EXITED",
            Self::Entering => "ENTERING",
            Self::Entered => "ENTERED",
            Self::Exiting => "EXITING",
        }
    }

    /// Returns whether an animation is in flight.
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Entering | Self::Exiting)
    }

    /// Returns whether the element is hidden and at rest.
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Exited | Self::Unmounted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Direction of a single animation run.
pub enum Direction {
    /// Towards shown.
    Enter,
    /// Towards hidden.
    Exit,
}

impl Direction {
    /// Transient status the machine holds while animating in this direction.
    pub const fn transient_status(self) -> TransitionStatus {
        match self {
            Self::Enter => TransitionStatus::Entering,
            Self::Exit => TransitionStatus::Exiting,
        }
    }

    /// Class-name suffix used by directional animations.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Enter => "in",
            Self::Exit => "out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
/// Animation name, either shared by both directions or split per direction.
pub enum AnimationName {
    /// Same animation for enter and exit.
    Single(String),
    /// Distinct enter and exit animations.
    Split {
        /// Animation played while entering.
        enter: String,
        /// Animation played while exiting.
        exit: String,
    },
}

impl AnimationName {
    /// Returns the name that applies to `direction`.
    pub fn for_direction(&self, direction: Direction) -> &str {
        match (self, direction) {
            (Self::Single(name), _) => name,
            (Self::Split { enter, .. }, Direction::Enter) => enter,
            (Self::Split { exit, .. }, Direction::Exit) => exit,
        }
    }
}

impl From<&str> for AnimationName {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for AnimationName {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
/// Animation duration in milliseconds.
pub enum TransitionDuration {
    /// Same duration for both directions.
    Uniform(u32),
    /// Separate show (enter) and hide (exit) durations.
    Split {
        /// Enter duration.
        show: u32,
        /// Exit duration.
        hide: u32,
    },
}

impl TransitionDuration {
    /// Returns the duration for `direction`.
    pub const fn millis_for(self, direction: Direction) -> u32 {
        match (self, direction) {
            (Self::Uniform(ms), _) => ms,
            (Self::Split { show, .. }, Direction::Enter) => show,
            (Self::Split { hide, .. }, Direction::Exit) => hide,
        }
    }
}

impl From<u32> for TransitionDuration {
    fn from(value: u32) -> Self {
        Self::Uniform(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Animation parameters read each time a transition starts.
pub struct TransitionConfig {
    /// Named animation defined by the stylesheet.
    pub animation: AnimationName,
    /// Whether the stylesheet defines separate `-in`/`-out` keyframes for the animation.
    pub directional: bool,
    /// Explicit duration; `None` falls back to the default duration.
    pub duration: Option<TransitionDuration>,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::named(DEFAULT_ANIMATION)
    }
}

impl TransitionConfig {
    /// Builds a non-directional config for `animation` with the default duration.
    pub fn new(animation: impl Into<AnimationName>) -> Self {
        Self {
            animation: animation.into(),
            directional: false,
            duration: None,
        }
    }

    /// Builds a config whose directionality comes from the built-in animation catalog.
    ///
    /// Split names are directional when their enter animation is.
    pub fn named(animation: impl Into<AnimationName>) -> Self {
        let animation = animation.into();
        let directional = AnimationCatalog::builtin()
            .is_directional(animation.for_direction(Direction::Enter));
        Self {
            animation,
            directional,
            duration: None,
        }
    }

    /// Sets the directional flag.
    pub fn with_directional(mut self, directional: bool) -> Self {
        self.directional = directional;
        self
    }

    /// Sets an explicit duration.
    pub fn with_duration(mut self, duration: impl Into<TransitionDuration>) -> Self {
        self.duration = Some(duration.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Rules for whether the element is present in the render tree.
pub struct MountPolicy {
    /// Wait for the first enter before mounting.
    pub mount_on_show: bool,
    /// Unmount once an exit animation completes.
    pub unmount_on_hide: bool,
}

impl MountPolicy {
    /// Returns whether either flag takes the element out of the tree while unmounted.
    pub const fn is_gated(self) -> bool {
        self.mount_on_show || self.unmount_on_hide
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Caller inputs re-evaluated on every update.
pub struct TransitionRequest {
    /// Whether the element should be shown.
    pub visible: bool,
    /// Mount policy flags.
    #[serde(flatten)]
    pub policy: MountPolicy,
    /// Run the enter animation at construction when initially visible.
    pub transition_on_mount: bool,
}

impl TransitionRequest {
    /// Builds a request with the given visibility and no mount policy.
    pub const fn new(visible: bool) -> Self {
        Self {
            visible,
            policy: MountPolicy {
                mount_on_show: false,
                unmount_on_hide: false,
            },
            transition_on_mount: false,
        }
    }

    /// Sets `mount_on_show`.
    pub const fn mount_on_show(mut self, value: bool) -> Self {
        self.policy.mount_on_show = value;
        self
    }

    /// Sets `unmount_on_hide`.
    pub const fn unmount_on_hide(mut self, value: bool) -> Self {
        self.policy.unmount_on_hide = value;
        self
    }

    /// Sets `transition_on_mount`.
    pub const fn transition_on_mount(mut self, value: bool) -> Self {
        self.transition_on_mount = value;
        self
    }
}
