//! Compatibility Checker
//!
//! Decides whether a standard can be negotiated at all across an
//! adapter → cable → device chain. Every rule is evaluated so that all
//! problems surface at once.

use serde::{Deserialize, Serialize};

use crate::messages::{Message, MessageKey};
use crate::model::{AdapterSpec, CableSpec, DeviceSpec, Part, Port, Standard};

/// Minimum voltage adapter and device must reach for EPR.
pub const EPR_MIN_VOLTAGE: f64 = 28.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compatibility {
    pub compatible: bool,
    pub reasons: Vec<Message>,
}

impl Compatibility {
    fn from_reasons(reasons: Vec<Message>) -> Self {
        Self {
            compatible: reasons.is_empty(),
            reasons,
        }
    }

    pub fn has_reason(&self, key: MessageKey) -> bool {
        self.reasons.iter().any(|r| r.key == key)
    }
}

pub fn check_compatibility(
    standard: Standard,
    adapter: &AdapterSpec,
    cable: &CableSpec,
    device: &DeviceSpec,
) -> Compatibility {
    let mut reasons = Vec::new();

    reasons.extend(check_connectors(adapter, cable, device));

    if !adapter.supports(standard) {
        reasons.push(Message::new(MessageKey::AdapterStandardUnsupported).with("standard", standard));
    }
    if !device.supports(standard) {
        reasons.push(Message::new(MessageKey::DeviceStandardUnsupported).with("standard", standard));
    }

    if cable.has_usb_a() && !standard.is_legacy() {
        reasons.push(Message::new(MessageKey::UsbAStandardDisallowed).with("standard", standard));
    }

    if standard == Standard::PdEpr {
        reasons.extend(check_epr(adapter, cable, device));
    }

    Compatibility::from_reasons(reasons)
}

fn check_connectors(adapter: &AdapterSpec, cable: &CableSpec, device: &DeviceSpec) -> Vec<Message> {
    let mut reasons = Vec::new();

    match Port::for_connector(cable.adapter_end()) {
        Some(port) if adapter.has_port(port) => {}
        Some(port) => {
            reasons.push(Message::new(MessageKey::AdapterPortMissing).with("port", port));
        }
        // Lightning plugs have no adapter-side receptacle
        None => {
            reasons.push(
                Message::new(MessageKey::AdapterPortMissing).with("port", cable.adapter_end()),
            );
        }
    }

    if cable.device_end() != device.connector {
        reasons.push(
            Message::new(MessageKey::DeviceConnectorMismatch)
                .with("expected", device.connector)
                .with("actual", cable.device_end()),
        );
    }

    reasons
}

fn check_epr(adapter: &AdapterSpec, cable: &CableSpec, device: &DeviceSpec) -> Vec<Message> {
    let mut reasons = Vec::new();

    if !cable.e_marked {
        reasons.push(Message::new(MessageKey::EprCableRequired));
    }
    for (part, max_v) in [(Part::Adapter, adapter.max_v), (Part::Device, device.max_v)] {
        if max_v < EPR_MIN_VOLTAGE {
            reasons.push(
                Message::new(MessageKey::EprVoltageRequired)
                    .with("part", part)
                    .with("required", EPR_MIN_VOLTAGE)
                    .with("actual", max_v),
            );
        }
    }

    reasons
}
