use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnimationEntry {
    name: String,
    directional: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnimationManifest {
    schema_version: u32,
    animations: Vec<AnimationEntry>,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("animations.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let mut manifest: AnimationManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if manifest.schema_version != 1 {
        panic!(
            "animation catalog schema mismatch in {}: expected 1 found {}",
            path.display(),
            manifest.schema_version
        );
    }

    let mut seen = BTreeSet::new();
    for entry in &manifest.animations {
        if entry.name.trim().is_empty() {
            panic!("animation catalog {} contains an empty name", path.display());
        }
        if !seen.insert(entry.name.clone()) {
            panic!(
                "animation catalog {} lists `{}` more than once",
                path.display(),
                entry.name
            );
        }
    }

    manifest.animations.sort_by(|a, b| a.name.cmp(&b.name));
    let json =
        serde_json::to_string_pretty(&manifest.animations).expect("serialize animation catalog");
    let generated = format!(
        "/// Build-time generated animation catalog JSON.\n\
pub const ANIMATION_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("animation_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
