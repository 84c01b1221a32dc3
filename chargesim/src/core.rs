//! Core simulation API shared by the CLI and any other front end.
//! No I/O happens here; catalogs and scenario files are loaded by callers.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::engine::{
    candidate_standards, check_compatibility, diagnose, estimate_charge_time, negotiate,
    negotiator::round_to, select_standard, EPSILON,
};
use crate::messages::{Message, MessageKey};
use crate::model::{AdapterSpec, CableSpec, DeviceSpec, Part, Standard, StandardSelection};

#[derive(Debug, thiserror::Error)]
pub enum ChargeSimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown {kind} preset: {selector}")]
    UnknownPreset { kind: &'static str, selector: String },
    #[error("Unknown charging standard: {0}")]
    UnknownStandard(String),
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
    #[error("Catalog error: {0}")]
    Catalog(String),
}

/// Options for a simulation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationOptions {
    #[serde(default)]
    pub selection: StandardSelection,
}

impl SimulationOptions {
    pub fn forced(standard: Standard) -> Self {
        Self {
            selection: StandardSelection::Forced(standard),
        }
    }
}

/// Fully-specified components plus a selection directive, as read from a
/// scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub adapter: AdapterSpec,
    pub cable: CableSpec,
    pub device: DeviceSpec,
    #[serde(default)]
    pub standard: StandardSelection,
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self, ChargeSimError> {
        let content = std::fs::read_to_string(path)?;
        let scenario = serde_json::from_str(&content)?;
        Ok(scenario)
    }

    pub fn simulate(&self) -> SimulationResult {
        ChargeSimCore::simulate(
            &self.adapter,
            &self.cable,
            &self.device,
            &SimulationOptions {
                selection: self.standard,
            },
        )
    }
}

/// Outcome of one simulation. Electrical values are rounded for display:
/// voltage and power to 0.1, current to 0.01.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub selection: StandardSelection,
    pub standard: Option<Standard>,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub meets_recommended: bool,
    /// Minutes for the 20% → 80% window
    pub charge_minutes: Option<u32>,
    pub limiting_parts: Vec<Part>,
    pub bottlenecks: Vec<Message>,
    pub suggestions: Vec<Message>,
    /// Rules the evaluated standard violates. In Auto mode this is only
    /// filled when nothing is compatible, for the highest-priority shared
    /// standard (or the baseline when nothing is shared).
    pub incompatibilities: Vec<Message>,
}

impl SimulationResult {
    pub fn has_standard(&self) -> bool {
        self.standard.is_some()
    }

    pub fn is_compatible(&self) -> bool {
        self.standard.is_some() && self.incompatibilities.is_empty()
    }

    pub fn has_bottleneck(&self, key: MessageKey) -> bool {
        self.bottlenecks.iter().any(|m| m.key == key)
    }

    pub fn has_suggestion(&self, key: MessageKey) -> bool {
        self.suggestions.iter().any(|m| m.key == key)
    }

    pub fn has_incompatibility(&self, key: MessageKey) -> bool {
        self.incompatibilities.iter().any(|m| m.key == key)
    }

    pub fn is_limited_by(&self, part: Part) -> bool {
        self.limiting_parts.contains(&part)
    }
}

/// Core simulation API.
pub struct ChargeSimCore;

impl ChargeSimCore {
    /// Run the full pipeline: select, check, negotiate, diagnose, estimate.
    pub fn simulate(
        adapter: &AdapterSpec,
        cable: &CableSpec,
        device: &DeviceSpec,
        options: &SimulationOptions,
    ) -> SimulationResult {
        let selection = options.selection;
        let standard = select_standard(selection, adapter, cable, device);
        let compatibility = check_compatibility(standard, adapter, cable, device);
        let shared = candidate_standards(&adapter.standards, &device.standards);

        let viable = match selection {
            StandardSelection::Auto => compatibility.compatible,
            StandardSelection::Forced(_) => !shared.is_empty(),
        };
        let incompatibilities = match selection {
            StandardSelection::Auto if viable => Vec::new(),
            // explain the most capable standard both sides list, or the baseline
            StandardSelection::Auto => {
                let reported = shared.first().copied().unwrap_or(standard);
                check_compatibility(reported, adapter, cable, device).reasons
            }
            StandardSelection::Forced(_) => compatibility.reasons,
        };

        tracing::debug!(
            adapter = %adapter.name,
            cable = %cable.name,
            device = %device.name,
            selection = %selection,
            standard = %standard,
            viable,
            "selected standard"
        );

        if !viable {
            let diagnostics = diagnose(None, adapter, cable, device);
            return SimulationResult {
                selection,
                standard: None,
                voltage: 0.0,
                current: 0.0,
                power: 0.0,
                meets_recommended: false,
                charge_minutes: None,
                limiting_parts: diagnostics.limiting_parts,
                bottlenecks: diagnostics.bottlenecks,
                suggestions: diagnostics.suggestions,
                incompatibilities,
            };
        }

        let negotiation = negotiate(standard, adapter, cable, device);
        let diagnostics = diagnose(Some(&negotiation), adapter, cable, device);
        let charge_minutes = estimate_charge_time(negotiation.power, device);

        SimulationResult {
            selection,
            standard: Some(standard),
            voltage: round_to(negotiation.voltage, 1),
            current: round_to(negotiation.current, 2),
            power: round_to(negotiation.power, 1),
            meets_recommended: negotiation.power >= device.recommended_w - EPSILON,
            charge_minutes,
            limiting_parts: diagnostics.limiting_parts,
            bottlenecks: diagnostics.bottlenecks,
            suggestions: diagnostics.suggestions,
            incompatibilities,
        }
    }
}
