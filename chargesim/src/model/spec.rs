//! Component descriptors: adapters, cables and devices.
//!
//! All fields use volts, amperes and watts. Optional limits fall back to a
//! value derived from the wattage at the negotiated voltage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::standard::Standard;

/// Physical connector on a cable end or a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Connector {
    #[serde(rename = "USB-C", alias = "usb-c", alias = "usb_c")]
    UsbC,
    #[serde(rename = "USB-A", alias = "usb-a", alias = "usb_a")]
    UsbA,
    #[serde(rename = "Lightning", alias = "lightning")]
    Lightning,
}

impl Connector {
    pub fn label(&self) -> &'static str {
        match self {
            Connector::UsbC => "USB-C",
            Connector::UsbA => "USB-A",
            Connector::Lightning => "Lightning",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receptacle on an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Port {
    #[serde(rename = "USB-C", alias = "usb-c", alias = "usb_c")]
    UsbC,
    #[serde(rename = "USB-A", alias = "usb-a", alias = "usb_a")]
    UsbA,
}

impl Port {
    /// The port a cable end plugs into, if adapters have one.
    pub fn for_connector(connector: Connector) -> Option<Port> {
        match connector {
            Connector::UsbC => Some(Port::UsbC),
            Connector::UsbA => Some(Port::UsbA),
            Connector::Lightning => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Port::UsbC => "USB-C",
            Port::UsbA => "USB-A",
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One link of the adapter → cable → device chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Adapter,
    Cable,
    Device,
}

impl Part {
    pub const ALL: [Part; 3] = [Part::Adapter, Part::Cable, Part::Device];

    pub fn id(&self) -> &'static str {
        match self {
            Part::Adapter => "adapter",
            Part::Cable => "cable",
            Part::Device => "device",
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A power adapter (wall charger).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdapterSpec {
    pub name: String,
    pub max_w: f64,
    pub max_v: f64,
    /// Derived from `max_w` at the negotiated voltage when absent
    #[serde(default)]
    pub max_a: Option<f64>,
    #[serde(default)]
    pub standards: BTreeSet<Standard>,
    #[serde(default)]
    pub ports: BTreeSet<Port>,
    #[serde(default)]
    pub note: Option<String>,
}

impl AdapterSpec {
    pub fn supports(&self, standard: Standard) -> bool {
        self.standards.contains(&standard)
    }

    pub fn has_port(&self, port: Port) -> bool {
        self.ports.contains(&port)
    }
}

/// A cable, described from the adapter end to the device end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableSpec {
    pub name: String,
    /// `[adapter end, device end]`
    pub connectors: (Connector, Connector),
    pub max_a: f64,
    pub max_v: f64,
    #[serde(default)]
    pub max_w: Option<f64>,
    /// Electronically marked for 5A / EPR operation
    #[serde(default, alias = "eMarked", alias = "epr")]
    pub e_marked: bool,
    #[serde(default)]
    pub usb_version: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Current a cable without an e-marker is trusted with.
pub const UNMARKED_CABLE_MAX_A: f64 = 3.0;

impl CableSpec {
    pub fn adapter_end(&self) -> Connector {
        self.connectors.0
    }

    pub fn device_end(&self) -> Connector {
        self.connectors.1
    }

    pub fn has_usb_a(&self) -> bool {
        self.connectors.0 == Connector::UsbA || self.connectors.1 == Connector::UsbA
    }

    /// Rated current, capped at 3A unless the cable is e-marked.
    pub fn current_limit(&self) -> f64 {
        let rated = self.max_a.max(0.0);
        if self.e_marked {
            rated
        } else {
            rated.min(UNMARKED_CABLE_MAX_A)
        }
    }
}

/// A device being charged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSpec {
    pub name: String,
    /// Sustained wattage the device is happy charging at
    pub recommended_w: f64,
    pub max_w: f64,
    pub max_v: f64,
    #[serde(default)]
    pub max_a: Option<f64>,
    #[serde(default)]
    pub battery_wh: Option<f64>,
    #[serde(default)]
    pub battery_mah: Option<f64>,
    #[serde(default)]
    pub nominal_voltage: Option<f64>,
    #[serde(default)]
    pub standards: BTreeSet<Standard>,
    pub connector: Connector,
    #[serde(default)]
    pub note: Option<String>,
}

impl DeviceSpec {
    pub fn supports(&self, standard: Standard) -> bool {
        self.standards.contains(&standard)
    }

    /// Battery capacity in watt-hours, directly or from mAh × nominal volts.
    pub fn battery_capacity_wh(&self) -> Option<f64> {
        if let Some(wh) = self.battery_wh.filter(|wh| *wh > 0.0) {
            return Some(wh);
        }
        match (self.battery_mah, self.nominal_voltage) {
            (Some(mah), Some(v)) if mah > 0.0 && v > 0.0 => Some(mah * v / 1000.0),
            _ => None,
        }
    }
}
