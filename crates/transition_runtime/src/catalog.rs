//! Built-in catalog of named animations shipped with the transition stylesheet.

use std::sync::OnceLock;

use leptos::logging;
use serde::{Deserialize, Serialize};

use crate::settings::ConfigError;

include!(concat!(env!("OUT_DIR"), "/animation_catalog_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One named animation.
pub struct AnimationEntry {
    /// Stylesheet animation name (for example `fade up`).
    pub name: String,
    /// Whether the stylesheet defines separate `-in`/`-out` keyframes.
    pub directional: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Name-sorted animation catalog.
pub struct AnimationCatalog {
    entries: Vec<AnimationEntry>,
}

impl AnimationCatalog {
    /// Parses a catalog from its JSON array form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Catalog`] when `raw` is not a valid entry array.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut entries: Vec<AnimationEntry> =
            serde_json::from_str(raw).map_err(ConfigError::Catalog)?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries.dedup_by(|a, b| a.name == b.name);
        Ok(Self { entries })
    }

    /// Returns the catalog embedded at build time from `animations.toml`.
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<AnimationCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::from_json(ANIMATION_CATALOG_JSON).unwrap_or_else(|err| {
                logging::warn!("built-in animation catalog load failed: {err}");
                Self::default()
            })
        })
    }

    /// Looks up an animation by exact name.
    pub fn get(&self, name: &str) -> Option<&AnimationEntry> {
        self.entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.entries[index])
    }

    /// Returns whether `name` is a known directional animation. Unknown names are static.
    pub fn is_directional(&self, name: &str) -> bool {
        self.get(name).map(|entry| entry.directional).unwrap_or(false)
    }

    /// Iterates all catalog entries in name order.
    pub fn entries(&self) -> impl Iterator<Item = &AnimationEntry> {
        self.entries.iter()
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
