//! Serde-facing transition settings as supplied by hosts (props, JSON theme files).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::AnimationCatalog,
    model::{AnimationName, Direction, TransitionConfig, TransitionDuration, DEFAULT_ANIMATION},
};

#[derive(Debug, Error)]
/// Errors raised while turning host-supplied settings into engine configuration.
pub enum ConfigError {
    /// A duration string was not a non-negative whole number of milliseconds.
    #[error("invalid transition duration `{0}`")]
    InvalidDuration(String),
    /// An animation name was empty.
    #[error("animation name must not be empty")]
    EmptyAnimation,
    /// The animation catalog JSON could not be parsed.
    #[error("invalid animation catalog: {0}")]
    Catalog(#[source] serde_json::Error),
    /// Transition settings JSON could not be parsed.
    #[error("invalid transition settings: {0}")]
    Settings(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
/// Duration as hosts may write it: a number, a numeric string, or a show/hide pair.
pub enum DurationSetting {
    /// Milliseconds.
    Millis(u32),
    /// Milliseconds as text, optionally suffixed with `ms`.
    Text(String),
    /// Per-direction milliseconds.
    Split {
        /// Enter duration.
        show: u32,
        /// Exit duration.
        hide: u32,
    },
}

impl TryFrom<DurationSetting> for TransitionDuration {
    type Error = ConfigError;

    fn try_from(value: DurationSetting) -> Result<Self, Self::Error> {
        match value {
            DurationSetting::Millis(ms) => Ok(Self::Uniform(ms)),
            DurationSetting::Split { show, hide } => Ok(Self::Split { show, hide }),
            DurationSetting::Text(raw) => parse_duration_text(&raw).map(Self::Uniform),
        }
    }
}

fn parse_duration_text(raw: &str) -> Result<u32, ConfigError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_suffix("ms").unwrap_or(trimmed).trim_end();
    digits
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidDuration(raw.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
/// Loosely typed transition props.
pub struct TransitionSettings {
    /// Animation name or enter/exit pair; absent means the default animation.
    pub animation: Option<AnimationName>,
    /// Explicit directionality; absent means look the animation up in the catalog.
    pub directional: Option<bool>,
    /// Duration; absent means the default duration.
    pub duration: Option<DurationSetting>,
}

impl TransitionSettings {
    /// Parses settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Settings`] for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Settings)
    }

    /// Resolves these settings against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] or [`ConfigError::EmptyAnimation`].
    pub fn resolve(&self, catalog: &AnimationCatalog) -> Result<TransitionConfig, ConfigError> {
        let animation = self
            .animation
            .clone()
            .unwrap_or_else(|| AnimationName::from(DEFAULT_ANIMATION));
        let is_empty = [Direction::Enter, Direction::Exit]
            .iter()
            .any(|direction| animation.for_direction(*direction).trim().is_empty());
        if is_empty {
            return Err(ConfigError::EmptyAnimation);
        }

        let directional = self.directional.unwrap_or_else(|| {
            catalog.is_directional(animation.for_direction(Direction::Enter))
        });
        let duration = self
            .duration
            .clone()
            .map(TransitionDuration::try_from)
            .transpose()?;

        Ok(TransitionConfig {
            animation,
            directional,
            duration,
        })
    }
}

impl TryFrom<TransitionSettings> for TransitionConfig {
    type Error = ConfigError;

    fn try_from(value: TransitionSettings) -> Result<Self, Self::Error> {
        value.resolve(AnimationCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_settings_resolve_to_default_fade() {
        let config = TransitionConfig::try_from(TransitionSettings::default()).expect("resolve");
        assert_eq!(config, TransitionConfig::named("fade"));
        assert!(config.directional);
        assert_eq!(config.duration, None);
    }

    #[test]
    fn numeric_string_and_pair_durations_parse() {
        let settings =
            TransitionSettings::from_json(r#"{"animation":"scale","duration":" 300ms "}"#)
                .expect("parse settings");
        let config = TransitionConfig::try_from(settings).expect("resolve");
        assert_eq!(config.duration, Some(TransitionDuration::Uniform(300)));

        let settings = TransitionSettings::from_json(
            r#"{"animation":{"enter":"fade","exit":"zoom"},"directional":false,"duration":{"show":400,"hide":150}}"#,
        )
        .expect("parse settings");
        let config = TransitionConfig::try_from(settings).expect("resolve");
        assert!(!config.directional);
        assert_eq!(
            config.duration,
            Some(TransitionDuration::Split {
                show: 400,
                hide: 150
            })
        );
    }

    #[test]
    fn invalid_duration_and_empty_name_are_rejected() {
        let settings = TransitionSettings {
            duration: Some(DurationSetting::Text("soon".to_string())),
            ..TransitionSettings::default()
        };
        let err = TransitionConfig::try_from(settings).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration(raw) if raw == "soon"));

        let settings = TransitionSettings {
            animation: Some(AnimationName::from("  ")),
            ..TransitionSettings::default()
        };
        assert!(matches!(
            TransitionConfig::try_from(settings),
            Err(ConfigError::EmptyAnimation)
        ));
    }

    #[test]
    fn malformed_settings_json_names_the_settings() {
        let err = TransitionSettings::from_json(r#"{"duration": "#).unwrap_err();
        assert!(matches!(err, ConfigError::Settings(_)));
        assert!(err.to_string().starts_with("invalid transition settings: "));
    }

    #[test]
    fn explicit_directional_overrides_catalog() {
        let settings = TransitionSettings {
            animation: Some(AnimationName::from("jiggle")),
            directional: Some(true),
            duration: None,
        };
        assert!(TransitionConfig::try_from(settings).expect("resolve").directional);
    }
}
