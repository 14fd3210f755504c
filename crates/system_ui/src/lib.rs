//! Leptos transition primitives for shell and app UI.
//!
//! The crate wraps the [`transition_runtime`] engine in two components, [`Transition`] and
//! [`TransitionGroup`], and exposes the stable `data-ui-*` DOM contract consumed by the shell
//! CSS layers (`data-ui-kind="transition"`, `data-ui-state="ENTERING"`, ...). Animation timing
//! runs on browser timeouts through [`TimeoutScheduler`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod bridge;
mod primitives;
mod timeout;

pub use bridge::{TransitionBridge, TransitionView};
pub use primitives::{Transition, TransitionGroup};
pub use timeout::TimeoutScheduler;
pub use transition_runtime::{
    AnimationName, TransitionConfig, TransitionDuration, TransitionSettings, TransitionStatus,
    DEFAULT_DURATION_MS,
};

