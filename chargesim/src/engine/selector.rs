//! Standard Selector

use std::collections::BTreeSet;

use super::compatibility::check_compatibility;
use crate::model::{
    AdapterSpec, CableSpec, DeviceSpec, Standard, StandardSelection, BASELINE_STANDARD,
};

/// Standards both sides list, highest priority first.
pub fn candidate_standards(
    adapter_standards: &BTreeSet<Standard>,
    device_standards: &BTreeSet<Standard>,
) -> Vec<Standard> {
    // BTreeSet iterates in priority order
    adapter_standards
        .intersection(device_standards)
        .copied()
        .collect()
}

/// Highest-priority mutually supported standard that passes every
/// compatibility rule.
pub fn best_compatible_standard(
    adapter: &AdapterSpec,
    cable: &CableSpec,
    device: &DeviceSpec,
) -> Option<Standard> {
    candidate_standards(&adapter.standards, &device.standards)
        .into_iter()
        .find(|s| {
            let compatible = check_compatibility(*s, adapter, cable, device).compatible;
            tracing::debug!(standard = %s, compatible, "evaluated candidate standard");
            compatible
        })
}

/// Resolve a selection directive to the standard to evaluate.
///
/// A forced standard is returned unchanged even when it cannot work; the
/// checker reports why. Auto falls back to the baseline standard.
pub fn select_standard(
    selection: StandardSelection,
    adapter: &AdapterSpec,
    cable: &CableSpec,
    device: &DeviceSpec,
) -> Standard {
    match selection {
        StandardSelection::Forced(standard) => standard,
        StandardSelection::Auto => {
            best_compatible_standard(adapter, cable, device).unwrap_or(BASELINE_STANDARD)
        }
    }
}
