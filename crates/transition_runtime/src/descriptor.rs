//! Resolves a transition config into the concrete class name and duration for one direction.

use crate::model::{Direction, TransitionConfig, TransitionStatus};

/// Duration applied when a config carries none. Stylesheets are tuned against this value.
pub const DEFAULT_DURATION_MS: u32 = 500;

/// Base class carried by every transition wrapper.
pub const TRANSITION_CLASS: &str = "ui-transition";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Concrete animation parameters for one transition run.
pub struct AnimationDescriptor {
    /// Class name that selects the stylesheet animation.
    pub class_name: String,
    /// How long the animation runs.
    pub duration_ms: u32,
    /// Transient status held while the animation runs.
    pub target: TransitionStatus,
}

/// Resolves `config` for `direction`.
///
/// Directional animations get an `-in`/`-out` suffix. Names are not validated; an unknown name
/// simply matches no stylesheet rule.
pub fn resolve_animation(config: &TransitionConfig, direction: Direction) -> AnimationDescriptor {
    let name = config.animation.for_direction(direction);
    let class_name = if config.directional {
        format!("{name}-{}", direction.suffix())
    } else {
        name.to_string()
    };
    let duration_ms = config
        .duration
        .map(|duration| duration.millis_for(direction))
        .unwrap_or(DEFAULT_DURATION_MS);

    AnimationDescriptor {
        class_name,
        duration_ms,
        target: direction.transient_status(),
    }
}

/// Builds the full class attribute for an element in `status`.
///
/// `animation` is the descriptor of the running animation and is only consulted while the
/// status is transient.
pub fn transition_class_list(
    status: TransitionStatus,
    animation: Option<&AnimationDescriptor>,
) -> String {
    match (status, animation) {
        (TransitionStatus::Entering | TransitionStatus::Exiting, Some(animation)) => {
            format!("{TRANSITION_CLASS} {} animating", animation.class_name)
        }
        (TransitionStatus::Entering | TransitionStatus::Exiting, None) => {
            format!("{TRANSITION_CLASS} animating")
        }
        (TransitionStatus::Entered, _) => format!("{TRANSITION_CLASS} visible"),
        (TransitionStatus::Exited | TransitionStatus::Unmounted, _) => {
            format!("{TRANSITION_CLASS} hidden")
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AnimationName, TransitionDuration};

    #[test]
    fn non_directional_name_passes_through() {
        let config = TransitionConfig::new("fade").with_duration(200);
        let enter = resolve_animation(&config, Direction::Enter);
        assert_eq!(
            enter,
            AnimationDescriptor {
                class_name: "fade".to_string(),
                duration_ms: 200,
                target: TransitionStatus::Entering,
            }
        );
        assert_eq!(resolve_animation(&config, Direction::Exit).class_name, "fade");
    }

    #[test]
    fn directional_name_gets_direction_suffix() {
        let config = TransitionConfig::new("slide down").with_directional(true);
        assert_eq!(
            resolve_animation(&config, Direction::Enter).class_name,
            "slide down-in"
        );
        let exit = resolve_animation(&config, Direction::Exit);
        assert_eq!(exit.class_name, "slide down-out");
        assert_eq!(exit.target, TransitionStatus::Exiting);
    }

    #[test]
    fn missing_duration_defaults_to_500ms() {
        let config = TransitionConfig::new("scale");
        assert_eq!(resolve_animation(&config, Direction::Enter).duration_ms, 500);
        assert_eq!(resolve_animation(&config, Direction::Exit).duration_ms, 500);
    }

    #[test]
    fn split_config_selects_per_direction() {
        let config = TransitionConfig {
            animation: AnimationName::Split {
                enter: "fly up".to_string(),
                exit: "drop".to_string(),
            },
            directional: false,
            duration: Some(TransitionDuration::Split { show: 250, hide: 90 }),
        };
        let enter = resolve_animation(&config, Direction::Enter);
        let exit = resolve_animation(&config, Direction::Exit);
        assert_eq!((enter.class_name.as_str(), enter.duration_ms), ("fly up", 250));
        assert_eq!((exit.class_name.as_str(), exit.duration_ms), ("drop", 90));
    }

    #[test]
    fn class_list_tracks_status() {
        let animation = resolve_animation(&TransitionConfig::new("fade"), Direction::Enter);
        assert_eq!(
            transition_class_list(TransitionStatus::Entering, Some(&animation)),
            "ui-transition fade animating"
        );
        assert_eq!(
            transition_class_list(TransitionStatus::Entered, Some(&animation)),
            "ui-transition visible"
        );
        assert_eq!(
            transition_class_list(TransitionStatus::Exited, None),
            "ui-transition hidden"
        );
        assert_eq!(
            transition_class_list(TransitionStatus::Unmounted, None),
            "ui-transition hidden"
        );
    }
}
