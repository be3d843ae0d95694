use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    compositions: HashMap<String, String>,
    properties: HashMap<String, PropertyEntry>,
}

/// A property fixture and the composition its frame numbers refer to.
#[derive(Debug, Deserialize)]
struct PropertyEntry {
    path: String,
    composition: String,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod compositions {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.compositions.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.compositions, "composition", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.compositions, "composition", name)?;
        super::load_json(rel)
    }
}

pub mod properties {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.properties.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.properties, "property", name)?;
        read_to_string(&entry.path)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.properties, "property", name)?;
        super::load_json(&entry.path)
    }

    /// JSON of the composition the property's frame numbers belong to.
    pub fn composition_json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.properties, "property", name)?;
        super::compositions::json(&entry.composition)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.properties, "property", name)?;
        Ok(resolve_path(&entry.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_resolves() {
        for name in compositions::keys() {
            let value: serde_json::Value = compositions::load(&name).unwrap();
            assert!(value.get("fr").is_some(), "{name} has no frame rate");
        }
        for name in properties::keys() {
            assert!(properties::path(&name).unwrap().exists());
            let value: serde_json::Value = properties::load(&name).unwrap();
            assert!(value.get("k").is_some(), "{name} has no keyframes");
            properties::composition_json(&name).unwrap();
        }
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        assert!(properties::json("missing").is_err());
    }
}
