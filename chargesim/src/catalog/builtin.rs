//! Built-in and External Presets
//!
//! Presets come from:
//! 1. JSON files embedded into the binary (`presets/adapters.json`,
//!    `presets/cables.json`, `presets/devices.json`)
//! 2. User catalog files, either one file or a directory of them
//!
//! Users can add their own hardware without recompiling.

use std::path::Path;

use super::Catalog;
use crate::model::{AdapterSpec, CableSpec, DeviceSpec};

const EMBEDDED_ADAPTERS: &str = include_str!("../../presets/adapters.json");
const EMBEDDED_CABLES: &str = include_str!("../../presets/cables.json");
const EMBEDDED_DEVICES: &str = include_str!("../../presets/devices.json");

fn parse_embedded<T: serde::de::DeserializeOwned>(kind: &str, json: &str) -> Vec<T> {
    match serde_json::from_str::<Vec<T>>(json) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Failed to parse embedded {} presets: {}", kind, e);
            Vec::new()
        }
    }
}

/// Catalog made of the embedded presets only.
pub fn builtin_catalog() -> Catalog {
    Catalog {
        adapters: parse_embedded::<AdapterSpec>("adapter", EMBEDDED_ADAPTERS),
        cables: parse_embedded::<CableSpec>("cable", EMBEDDED_CABLES),
        devices: parse_embedded::<DeviceSpec>("device", EMBEDDED_DEVICES),
    }
}

/// Load every `*.json` catalog in a directory.
/// Returns the merged catalog and any errors encountered.
pub fn load_catalog_from_directory(dir: &Path) -> (Catalog, Vec<String>) {
    let mut catalog = Catalog::default();
    let mut errors = Vec::new();

    if !dir.is_dir() {
        errors.push(format!("Not a directory: {:?}", dir));
        return (catalog, errors);
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(format!("Failed to read directory {:?}: {}", dir, e));
            return (catalog, errors);
        }
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().map(|e| e == "json").unwrap_or(false))
        .collect();
    // read_dir order is platform dependent
    paths.sort();

    for path in paths {
        match Catalog::from_file(&path) {
            Ok(loaded) => catalog = catalog.merged(loaded),
            Err(e) => {
                let error_msg = format!("Failed to load {:?}: {}", path.file_name(), e);
                tracing::warn!("{}", error_msg);
                errors.push(error_msg);
            }
        }
    }

    (catalog, errors)
}

/// Load a catalog from a file or a directory, layered over the built-in presets.
pub fn load_catalog(path: &Path) -> Result<Catalog, crate::core::ChargeSimError> {
    let user = if path.is_dir() {
        let (catalog, errors) = load_catalog_from_directory(path);
        for error in &errors {
            tracing::warn!("Catalog loading error: {}", error);
        }
        catalog
    } else {
        Catalog::from_file(path)?
    };
    Ok(builtin_catalog().merged(user))
}
