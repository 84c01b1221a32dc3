//! Structured, locale-neutral messages.
//!
//! The engine never produces prose. Every bottleneck, suggestion and
//! incompatibility is a [`Message`]: a [`MessageKey`] plus named parameters.
//! [`render`] turns one into text for a [`Locale`].

pub mod locale;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{Connector, Part, Port, Standard};

pub use locale::{render, Locale};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    // Incompatibility reasons
    AdapterPortMissing,
    DeviceConnectorMismatch,
    AdapterStandardUnsupported,
    DeviceStandardUnsupported,
    UsbAStandardDisallowed,
    EprCableRequired,
    EprVoltageRequired,

    // Bottlenecks
    NoCommonStandard,
    NoCompatibleStandard,
    VoltageLimited,
    CurrentLimited,
    PowerLimited,
    UsbAVoltageCap,
    StandardLimited,

    // Suggestions
    BelowRecommended,
    #[serde(rename = "upgrade_cable_5a")]
    UpgradeCable5A,
    UpgradeAdapter,
    EprAdapter,
    EprCable,
    SwitchToUsbCPd,
}

impl MessageKey {
    pub fn id(&self) -> &'static str {
        match self {
            MessageKey::AdapterPortMissing => "adapter_port_missing",
            MessageKey::DeviceConnectorMismatch => "device_connector_mismatch",
            MessageKey::AdapterStandardUnsupported => "adapter_standard_unsupported",
            MessageKey::DeviceStandardUnsupported => "device_standard_unsupported",
            MessageKey::UsbAStandardDisallowed => "usb_a_standard_disallowed",
            MessageKey::EprCableRequired => "epr_cable_required",
            MessageKey::EprVoltageRequired => "epr_voltage_required",
            MessageKey::NoCommonStandard => "no_common_standard",
            MessageKey::NoCompatibleStandard => "no_compatible_standard",
            MessageKey::VoltageLimited => "voltage_limited",
            MessageKey::CurrentLimited => "current_limited",
            MessageKey::PowerLimited => "power_limited",
            MessageKey::UsbAVoltageCap => "usb_a_voltage_cap",
            MessageKey::StandardLimited => "standard_limited",
            MessageKey::BelowRecommended => "below_recommended",
            MessageKey::UpgradeCable5A => "upgrade_cable_5a",
            MessageKey::UpgradeAdapter => "upgrade_adapter",
            MessageKey::EprAdapter => "epr_adapter",
            MessageKey::EprCable => "epr_cable",
            MessageKey::SwitchToUsbCPd => "switch_to_usb_c_pd",
        }
    }
}

/// An interpolation value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageParam {
    Number(f64),
    Text(String),
}

impl From<f64> for MessageParam {
    fn from(v: f64) -> Self {
        MessageParam::Number(v)
    }
}

impl From<&str> for MessageParam {
    fn from(v: &str) -> Self {
        MessageParam::Text(v.to_string())
    }
}

impl From<String> for MessageParam {
    fn from(v: String) -> Self {
        MessageParam::Text(v)
    }
}

impl From<Part> for MessageParam {
    fn from(v: Part) -> Self {
        MessageParam::Text(v.id().to_string())
    }
}

impl From<Standard> for MessageParam {
    fn from(v: Standard) -> Self {
        MessageParam::Text(v.id().to_string())
    }
}

impl From<Connector> for MessageParam {
    fn from(v: Connector) -> Self {
        MessageParam::Text(v.label().to_string())
    }
}

impl From<Port> for MessageParam {
    fn from(v: Port) -> Self {
        MessageParam::Text(v.label().to_string())
    }
}

/// A message descriptor: key plus named parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub key: MessageKey,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, MessageParam>,
}

impl Message {
    pub fn new(key: MessageKey) -> Self {
        Self {
            key,
            params: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<MessageParam>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&MessageParam> {
        self.params.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.params.get(name) {
            Some(MessageParam::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// The component this message is about, if any.
    pub fn part(&self) -> Option<Part> {
        match self.params.get("part") {
            Some(MessageParam::Text(t)) => match t.as_str() {
                "adapter" => Some(Part::Adapter),
                "cable" => Some(Part::Cable),
                "device" => Some(Part::Device),
                _ => None,
            },
            _ => None,
        }
    }
}
