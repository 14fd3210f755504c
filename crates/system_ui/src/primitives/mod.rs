//! Transition primitives and the shared helpers they use for the `data-ui-*` DOM contract.

use leptos::*;
use transition_runtime::{AnimationName, TransitionConfig, TransitionDuration};

mod transition;
mod transition_group;

pub use transition::Transition;
pub use transition_group::TransitionGroup;

pub(crate) fn merge_layout_class(base: String, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base,
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Builds the engine config from the optional animation props shared by both primitives.
///
/// Without an explicit `directional` flag the animation's catalog entry decides.
pub(crate) fn config_from_props(
    animation: Option<AnimationName>,
    directional: Option<bool>,
    duration: Option<TransitionDuration>,
) -> TransitionConfig {
    let mut config = animation.map(TransitionConfig::named).unwrap_or_default();
    if let Some(directional) = directional {
        config.directional = directional;
    }
    config.duration = duration;
    config
}

/// Keeps `signal` in sync with `source` without notifying on identical values.
pub(crate) fn publish_if_changed<T: Clone + PartialEq + 'static>(signal: RwSignal<T>, source: T) {
    if signal.with_untracked(|current| *current != source) {
        signal.set(source);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn layout_class_is_appended_when_present() {
        assert_eq!(
            merge_layout_class("ui-transition visible".to_string(), Some("dialog-fade")),
            "ui-transition visible dialog-fade"
        );
        assert_eq!(
            merge_layout_class("ui-transition hidden".to_string(), Some("")),
            "ui-transition hidden"
        );
        assert_eq!(bool_token(true), "true");
    }

    #[test]
    fn props_fall_back_to_catalog_and_default_animation() {
        let config = config_from_props(None, None, None);
        assert_eq!(config, TransitionConfig::named("fade"));

        let config = config_from_props(
            Some(AnimationName::from("pulse")),
            None,
            Some(TransitionDuration::Uniform(120)),
        );
        assert!(!config.directional);
        assert_eq!(config.duration, Some(TransitionDuration::Uniform(120)));

        let config = config_from_props(Some(AnimationName::from("zoom")), Some(false), None);
        assert!(!config.directional);
    }
}
