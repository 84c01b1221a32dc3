//! Preset catalog of adapters, cables and devices.
//!
//! Presets are plain input data. The built-in set is embedded from
//! `presets/*.json`; a user catalog is one JSON document holding the same
//! three arrays. Lookups accept either an index or a name.

pub mod builtin;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::core::ChargeSimError;
use crate::model::{AdapterSpec, CableSpec, DeviceSpec};

/// Identifies a preset by position or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetSelector {
    Index(usize),
    Name(String),
}

impl FromStr for PresetSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<usize>() {
            Ok(i) => PresetSelector::Index(i),
            Err(_) => PresetSelector::Name(s.to_string()),
        })
    }
}

impl fmt::Display for PresetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetSelector::Index(i) => write!(f, "#{}", i),
            PresetSelector::Name(n) => f.write_str(n),
        }
    }
}

/// Anything in the catalog that can be looked up by name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for AdapterSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for CableSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for DeviceSpec {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Index lookup first, then exact name (case-insensitive), then a unique
/// substring match.
fn find<'a, T: Named>(items: &'a [T], selector: &PresetSelector) -> Option<&'a T> {
    match selector {
        PresetSelector::Index(i) => items.get(*i),
        PresetSelector::Name(name) => {
            let needle = name.to_lowercase();
            if let Some(exact) = items.iter().find(|it| it.name().to_lowercase() == needle) {
                return Some(exact);
            }
            let mut partial = items
                .iter()
                .filter(|it| it.name().to_lowercase().contains(&needle));
            match (partial.next(), partial.next()) {
                (Some(only), None) => Some(only),
                _ => None,
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub adapters: Vec<AdapterSpec>,
    #[serde(default)]
    pub cables: Vec<CableSpec>,
    #[serde(default)]
    pub devices: Vec<DeviceSpec>,
}

impl Catalog {
    /// Presets compiled into the library.
    pub fn builtin() -> Self {
        builtin::builtin_catalog()
    }

    pub fn from_json(json: &str) -> Result<Self, ChargeSimError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        if catalog.adapters.is_empty() && catalog.cables.is_empty() && catalog.devices.is_empty() {
            return Err(ChargeSimError::Catalog("catalog contains no presets".to_string()));
        }
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self, ChargeSimError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::info!(
            "Loaded catalog from {:?}: {} adapters, {} cables, {} devices",
            path,
            catalog.adapters.len(),
            catalog.cables.len(),
            catalog.devices.len()
        );
        Ok(catalog)
    }

    /// Append another catalog's presets after this one's.
    pub fn merged(mut self, other: Catalog) -> Self {
        self.adapters.extend(other.adapters);
        self.cables.extend(other.cables);
        self.devices.extend(other.devices);
        self
    }

    pub fn adapter(&self, selector: &PresetSelector) -> Result<&AdapterSpec, ChargeSimError> {
        find(&self.adapters, selector).ok_or_else(|| ChargeSimError::UnknownPreset {
            kind: "adapter",
            selector: selector.to_string(),
        })
    }

    pub fn cable(&self, selector: &PresetSelector) -> Result<&CableSpec, ChargeSimError> {
        find(&self.cables, selector).ok_or_else(|| ChargeSimError::UnknownPreset {
            kind: "cable",
            selector: selector.to_string(),
        })
    }

    pub fn device(&self, selector: &PresetSelector) -> Result<&DeviceSpec, ChargeSimError> {
        find(&self.devices, selector).ok_or_else(|| ChargeSimError::UnknownPreset {
            kind: "device",
            selector: selector.to_string(),
        })
    }
}
