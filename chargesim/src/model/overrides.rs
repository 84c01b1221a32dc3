//! User edits layered over a preset.
//!
//! Every field is optional; `apply` copies the preset and replaces only the
//! fields that are set, so presets stay untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::spec::{AdapterSpec, CableSpec, Connector, DeviceSpec, Port};
use super::standard::{with_standard_toggled, Standard};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdapterOverrides {
    #[serde(default)]
    pub max_w: Option<f64>,
    #[serde(default)]
    pub max_v: Option<f64>,
    #[serde(default)]
    pub max_a: Option<f64>,
    #[serde(default)]
    pub standards: Option<BTreeSet<Standard>>,
    #[serde(default)]
    pub ports: Option<BTreeSet<Port>>,
}

impl AdapterOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, base: &AdapterSpec) -> AdapterSpec {
        AdapterSpec {
            name: base.name.clone(),
            max_w: self.max_w.unwrap_or(base.max_w),
            max_v: self.max_v.unwrap_or(base.max_v),
            max_a: self.max_a.or(base.max_a),
            standards: self.standards.clone().unwrap_or_else(|| base.standards.clone()),
            ports: self.ports.clone().unwrap_or_else(|| base.ports.clone()),
            note: base.note.clone(),
        }
    }

    /// Flip `standard` relative to whatever set is currently in effect.
    pub fn toggle_standard(mut self, base: &AdapterSpec, standard: Standard) -> Self {
        let current = self.standards.as_ref().unwrap_or(&base.standards);
        self.standards = Some(with_standard_toggled(current, standard));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CableOverrides {
    #[serde(default)]
    pub connectors: Option<(Connector, Connector)>,
    #[serde(default)]
    pub max_a: Option<f64>,
    #[serde(default)]
    pub max_v: Option<f64>,
    #[serde(default)]
    pub max_w: Option<f64>,
    #[serde(default)]
    pub e_marked: Option<bool>,
}

impl CableOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, base: &CableSpec) -> CableSpec {
        CableSpec {
            name: base.name.clone(),
            connectors: self.connectors.unwrap_or(base.connectors),
            max_a: self.max_a.unwrap_or(base.max_a),
            max_v: self.max_v.unwrap_or(base.max_v),
            max_w: self.max_w.or(base.max_w),
            e_marked: self.e_marked.unwrap_or(base.e_marked),
            usb_version: base.usb_version.clone(),
            note: base.note.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceOverrides {
    #[serde(default)]
    pub recommended_w: Option<f64>,
    #[serde(default)]
    pub max_w: Option<f64>,
    #[serde(default)]
    pub max_v: Option<f64>,
    #[serde(default)]
    pub max_a: Option<f64>,
    #[serde(default)]
    pub battery_wh: Option<f64>,
    #[serde(default)]
    pub battery_mah: Option<f64>,
    #[serde(default)]
    pub nominal_voltage: Option<f64>,
    #[serde(default)]
    pub standards: Option<BTreeSet<Standard>>,
}

impl DeviceOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, base: &DeviceSpec) -> DeviceSpec {
        DeviceSpec {
            name: base.name.clone(),
            recommended_w: self.recommended_w.unwrap_or(base.recommended_w),
            max_w: self.max_w.unwrap_or(base.max_w),
            max_v: self.max_v.unwrap_or(base.max_v),
            max_a: self.max_a.or(base.max_a),
            battery_wh: self.battery_wh.or(base.battery_wh),
            battery_mah: self.battery_mah.or(base.battery_mah),
            nominal_voltage: self.nominal_voltage.or(base.nominal_voltage),
            standards: self.standards.clone().unwrap_or_else(|| base.standards.clone()),
            connector: base.connector,
            note: base.note.clone(),
        }
    }

    pub fn toggle_standard(mut self, base: &DeviceSpec, standard: Standard) -> Self {
        let current = self.standards.as_ref().unwrap_or(&base.standards);
        self.standards = Some(with_standard_toggled(current, standard));
        self
    }
}
