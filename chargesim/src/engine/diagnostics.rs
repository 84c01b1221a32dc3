//! Diagnostics Generator
//!
//! Compares a negotiation against each component's ceilings to find
//! bottlenecks, then applies a handful of heuristics to suggest upgrades.

use serde::{Deserialize, Serialize};

use super::negotiator::{round_to, Negotiation, USB_A_MAX_VOLTAGE};
use super::selector::candidate_standards;
use super::EPSILON;
use crate::messages::{Message, MessageKey};
use crate::model::{AdapterSpec, CableSpec, DeviceSpec, Part, Standard};

/// Voltage from which a 5A cable starts to matter.
pub const HIGH_VOLTAGE_THRESHOLD: f64 = 20.0;
/// Current a full-rated e-marked cable carries.
pub const FULL_RATED_CABLE_A: f64 = 5.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub limiting_parts: Vec<Part>,
    pub bottlenecks: Vec<Message>,
    pub suggestions: Vec<Message>,
}

impl Diagnostics {
    fn flag(&mut self, part: Part) {
        if !self.limiting_parts.contains(&part) {
            self.limiting_parts.push(part);
        }
    }

    fn sort_parts(&mut self) {
        self.limiting_parts.sort();
    }
}

/// Diagnose a negotiation; `None` means no standard could be used at all.
pub fn diagnose(
    negotiation: Option<&Negotiation>,
    adapter: &AdapterSpec,
    cable: &CableSpec,
    device: &DeviceSpec,
) -> Diagnostics {
    match negotiation {
        Some(n) => diagnose_negotiation(n, adapter, cable, device),
        None => diagnose_no_standard(adapter, device),
    }
}

fn diagnose_no_standard(adapter: &AdapterSpec, device: &DeviceSpec) -> Diagnostics {
    let key = if candidate_standards(&adapter.standards, &device.standards).is_empty() {
        MessageKey::NoCommonStandard
    } else {
        MessageKey::NoCompatibleStandard
    };
    Diagnostics {
        limiting_parts: Part::ALL.to_vec(),
        bottlenecks: vec![Message::new(key)],
        suggestions: Vec::new(),
    }
}

fn diagnose_negotiation(
    n: &Negotiation,
    adapter: &AdapterSpec,
    cable: &CableSpec,
    device: &DeviceSpec,
) -> Diagnostics {
    let mut diag = Diagnostics::default();

    for part in Part::ALL {
        let limits = n.limits(part);
        if n.voltage >= limits.voltage - EPSILON {
            diag.flag(part);
            diag.bottlenecks.push(
                Message::new(MessageKey::VoltageLimited)
                    .with("part", part)
                    .with("value", round_to(limits.voltage, 1)),
            );
        }
    }
    if n.usb_a_clamped && n.voltage >= USB_A_MAX_VOLTAGE - EPSILON {
        diag.flag(Part::Cable);
        diag.bottlenecks
            .push(Message::new(MessageKey::UsbAVoltageCap).with("value", USB_A_MAX_VOLTAGE));
    }
    let standard_v = n.standard.max_voltage();
    if !n.usb_a_clamped
        && (n.voltage - standard_v).abs() < EPSILON
        && n.component_voltage > standard_v + EPSILON
    {
        diag.bottlenecks.push(standard_limited(n.standard, "voltage", standard_v, "V"));
    }

    for part in Part::ALL {
        let limits = n.limits(part);
        if n.current >= limits.current - EPSILON {
            diag.flag(part);
            diag.bottlenecks.push(
                Message::new(MessageKey::CurrentLimited)
                    .with("part", part)
                    .with("value", round_to(limits.current, 2)),
            );
        }
    }
    let standard_a = n.standard.max_current();
    if n.voltage > 0.0
        && n.current >= standard_a - EPSILON
        && Part::ALL.iter().all(|p| n.limits(*p).current > standard_a + EPSILON)
    {
        diag.bottlenecks.push(standard_limited(n.standard, "current", standard_a, "A"));
    }

    for part in Part::ALL {
        if let Some(w) = n.limits(part).power {
            if n.power >= w - EPSILON {
                diag.flag(part);
                diag.bottlenecks.push(
                    Message::new(MessageKey::PowerLimited)
                        .with("part", part)
                        .with("value", round_to(w, 1)),
                );
            }
        }
    }

    diag.sort_parts();
    diag.suggestions = suggestions(n, adapter, cable, device);
    diag
}

fn standard_limited(standard: Standard, quantity: &str, value: f64, unit: &str) -> Message {
    Message::new(MessageKey::StandardLimited)
        .with("standard", standard)
        .with("quantity", quantity)
        .with("value", value)
        .with("unit", unit)
}

fn suggestions(
    n: &Negotiation,
    adapter: &AdapterSpec,
    cable: &CableSpec,
    device: &DeviceSpec,
) -> Vec<Message> {
    let mut out = Vec::new();

    if n.power < device.recommended_w - EPSILON {
        out.push(
            Message::new(MessageKey::BelowRecommended)
                .with("power", round_to(n.power, 1))
                .with("recommended", device.recommended_w),
        );
    }

    if n.voltage >= HIGH_VOLTAGE_THRESHOLD - EPSILON
        && cable.current_limit() < FULL_RATED_CABLE_A - EPSILON
    {
        out.push(Message::new(MessageKey::UpgradeCable5A).with("voltage", round_to(n.voltage, 1)));
    }

    if adapter.max_w < device.recommended_w - EPSILON {
        out.push(
            Message::new(MessageKey::UpgradeAdapter)
                .with("recommended", device.recommended_w)
                .with("adapter_w", adapter.max_w),
        );
    }

    let device_epr = device.supports(Standard::PdEpr);
    let adapter_epr = adapter.supports(Standard::PdEpr);
    if device_epr && !adapter_epr {
        out.push(Message::new(MessageKey::EprAdapter));
    }
    if device_epr && adapter_epr && !cable.e_marked {
        out.push(Message::new(MessageKey::EprCable));
    }

    if n.standard.is_legacy() && cable.has_usb_a() {
        let faster = candidate_standards(&adapter.standards, &device.standards)
            .into_iter()
            .find(|s| s.is_power_delivery());
        if let Some(alternative) = faster {
            out.push(
                Message::new(MessageKey::SwitchToUsbCPd)
                    .with("standard", n.standard)
                    .with("alternative", alternative),
            );
        }
    }

    out
}
