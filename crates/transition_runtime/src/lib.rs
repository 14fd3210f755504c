//! Framework-agnostic visibility transition engine.
//!
//! A [`TransitionMachine`] drives one element through enter/exit animation phases from a boolean
//! visibility signal. Timing is delegated to a host [`PhaseScheduler`] (browser timeouts in
//! `system_ui`, or the [`ManualScheduler`] virtual clock for headless hosts and tests), lifecycle
//! callbacks go to a [`TransitionListener`], and [`should_render`] tells the host whether the
//! element belongs in the render tree at all.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod catalog;
pub mod descriptor;
pub mod group;
pub mod listener;
pub mod machine;
pub mod model;
pub mod mount;
pub mod scheduler;
pub mod settings;
pub mod timer;

pub use catalog::{AnimationCatalog, AnimationEntry};
pub use descriptor::{
    resolve_animation, transition_class_list, AnimationDescriptor, DEFAULT_DURATION_MS,
    TRANSITION_CLASS,
};
pub use group::TransitionGroup;
pub use listener::{EventQueue, TransitionCallbacks, TransitionEvent, TransitionListener};
pub use machine::TransitionMachine;
pub use model::*;
pub use mount::should_render;
pub use scheduler::{ManualScheduler, NoopScheduler};
pub use settings::{ConfigError, DurationSetting, TransitionSettings};
pub use timer::{PhaseScheduler, PhaseTimer, TimerHandle};
