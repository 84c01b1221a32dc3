//! Electrical Negotiator
//!
//! Voltage model: each standard has a legal range. The negotiated voltage is
//! the lowest component limit (and 5V over USB-A) capped at the standard's
//! ceiling. A chain that cannot reach the EPR floor stays in the SPR fixed
//! range (5-20V) at whatever the components allow; voltage is never raised
//! above the component minimum.
//!
//! Current is the lowest of the per-component limits and the standard's own
//! cap. Components without an explicit current rating are derived from their
//! wattage at the negotiated voltage.

use serde::{Deserialize, Serialize};

use crate::model::{AdapterSpec, CableSpec, DeviceSpec, Part, Standard};

/// Voltage ceiling of any chain that includes a USB-A end.
pub const USB_A_MAX_VOLTAGE: f64 = 5.0;

/// Per-component ceilings as seen at the negotiated voltage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartLimits {
    pub voltage: f64,
    pub current: f64,
    /// Wattage ceiling; cables without a rating have none
    pub power: Option<f64>,
}

/// Outcome of negotiating one standard, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Negotiation {
    pub standard: Standard,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub adapter: PartLimits,
    pub cable: PartLimits,
    pub device: PartLimits,
    /// The USB-A 5V clamp was lower than every component limit
    pub usb_a_clamped: bool,
    /// Lowest voltage the three components allow
    pub component_voltage: f64,
}

impl Negotiation {
    pub fn limits(&self, part: Part) -> &PartLimits {
        match part {
            Part::Adapter => &self.adapter,
            Part::Cable => &self.cable,
            Part::Device => &self.device,
        }
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

fn current_from(max_a: Option<f64>, max_w: f64, voltage: f64) -> f64 {
    match max_a {
        Some(a) => non_negative(a),
        None if voltage > 0.0 => non_negative(max_w) / voltage,
        None => 0.0,
    }
}

/// Negotiated voltage for `standard` given the lowest component voltage.
pub fn negotiate_voltage(standard: Standard, component_voltage: f64, usb_a: bool) -> f64 {
    let mut v = non_negative(component_voltage);
    if usb_a {
        v = v.min(USB_A_MAX_VOLTAGE);
    }
    v = v.min(standard.max_voltage());
    if v < standard.min_voltage() {
        v = v.min(Standard::Pd.max_voltage());
    }
    v
}

pub fn negotiate(
    standard: Standard,
    adapter: &AdapterSpec,
    cable: &CableSpec,
    device: &DeviceSpec,
) -> Negotiation {
    let component_voltage = non_negative(adapter.max_v)
        .min(non_negative(cable.max_v))
        .min(non_negative(device.max_v));
    let usb_a = cable.has_usb_a();
    let voltage = negotiate_voltage(standard, component_voltage, usb_a);

    let adapter_limits = PartLimits {
        voltage: non_negative(adapter.max_v),
        current: current_from(adapter.max_a, adapter.max_w, voltage),
        power: Some(non_negative(adapter.max_w)),
    };
    let cable_limits = PartLimits {
        voltage: non_negative(cable.max_v),
        current: cable.current_limit(),
        power: cable.max_w.map(non_negative),
    };
    let device_limits = PartLimits {
        voltage: non_negative(device.max_v),
        current: current_from(device.max_a, device.max_w, voltage),
        power: Some(non_negative(device.max_w)),
    };

    let current = if voltage > 0.0 {
        adapter_limits
            .current
            .min(cable_limits.current)
            .min(device_limits.current)
            .min(standard.max_current())
    } else {
        0.0
    };

    let mut power = voltage * current;
    for limits in [&adapter_limits, &cable_limits, &device_limits] {
        if let Some(w) = limits.power {
            power = power.min(w);
        }
    }

    tracing::debug!(
        standard = %standard,
        voltage,
        current,
        power,
        "negotiated chain"
    );

    Negotiation {
        standard,
        voltage,
        current,
        power,
        adapter: adapter_limits,
        cable: cable_limits,
        device: device_limits,
        usb_a_clamped: usb_a && component_voltage > USB_A_MAX_VOLTAGE,
        component_voltage,
    }
}

/// Round to `places` decimals for display.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::*;
    use crate::model::Connector;

    #[test]
    fn test_voltage_clamped_to_standard_ceiling() {
        assert_eq!(negotiate_voltage(Standard::Pd, 28.0, false), 20.0);
        assert_eq!(negotiate_voltage(Standard::Qc3, 20.0, false), 12.0);
        assert_eq!(negotiate_voltage(Standard::Bc12, 20.0, false), 5.0);
        assert_eq!(negotiate_voltage(Standard::PdEpr, 28.0, false), 28.0);
    }

    #[test]
    fn test_voltage_below_epr_floor_stays_in_spr_range() {
        assert_eq!(negotiate_voltage(Standard::PdEpr, 15.0, false), 15.0);
        assert_eq!(negotiate_voltage(Standard::PdEpr, 19.9, false), 19.9);
        assert_eq!(negotiate_voltage(Standard::Pd, 3.3, false), 3.3);
        for v in [5.0, 9.0, 15.0, 20.0, 28.0] {
            let epr = negotiate_voltage(Standard::PdEpr, v, false);
            assert!(epr >= negotiate_voltage(Standard::Pd, v, false));
        }
    }

    #[test]
    fn test_epr_below_floor_matches_pd_power() {
        let all = [Standard::PdEpr, Standard::Pd];
        let adapter = usb_c_adapter(140.0, 28.0, &all);
        let cable = c_to_c_cable(5.0, 15.0, true);
        let mut device = usb_c_device(140.0, 28.0, &all);
        device.max_a = Some(5.0);

        let epr = negotiate(Standard::PdEpr, &adapter, &cable, &device);
        let pd = negotiate(Standard::Pd, &adapter, &cable, &device);
        assert_eq!(epr.voltage, 15.0);
        assert_eq!(epr.current, 5.0);
        assert_eq!(epr.power, pd.power);
    }

    #[test]
    fn test_usb_a_caps_voltage() {
        assert_eq!(negotiate_voltage(Standard::Qc3, 12.0, true), 5.0);
        assert_eq!(negotiate_voltage(Standard::PdEpr, 48.0, true), 5.0);
    }

    #[test]
    fn test_adapter_current_derived_from_wattage() {
        let n = negotiate(
            Standard::Pd,
            &usb_c_adapter(20.0, 9.0, &[Standard::Pd]),
            &c_to_c_cable(3.0, 20.0, false),
            &usb_c_device(30.0, 9.0, &[Standard::Pd]),
        );
        assert_eq!(n.voltage, 9.0);
        assert!((n.current - 20.0 / 9.0).abs() < 1e-9);
        assert!((n.power - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_unmarked_cable_limits_current() {
        let mut adapter = usb_c_adapter(100.0, 20.0, &[Standard::Pd]);
        adapter.max_a = Some(5.0);
        let mut device = usb_c_device(100.0, 20.0, &[Standard::Pd]);
        device.max_a = Some(5.0);

        let n = negotiate(Standard::Pd, &adapter, &c_to_c_cable(5.0, 20.0, false), &device);
        assert_eq!(n.current, 3.0);
        assert_eq!(n.power, 60.0);

        let n = negotiate(Standard::Pd, &adapter, &c_to_c_cable(5.0, 20.0, true), &device);
        assert_eq!(n.current, 5.0);
        assert_eq!(n.power, 100.0);
    }

    #[test]
    fn test_power_clamped_to_cable_wattage() {
        let mut cable = c_to_c_cable(5.0, 20.0, true);
        cable.max_w = Some(60.0);
        let n = negotiate(
            Standard::Pd,
            &usb_c_adapter(100.0, 20.0, &[Standard::Pd]),
            &cable,
            &usb_c_device(100.0, 20.0, &[Standard::Pd]),
        );
        assert_eq!(n.power, 60.0);
        assert!(n.power <= n.voltage * n.current + 1e-9);
    }

    #[test]
    fn test_legacy_standard_current_cap() {
        let mut adapter = usb_c_adapter(12.0, 5.0, &[Standard::Bc12]);
        adapter.ports.insert(crate::model::Port::UsbA);
        let n = negotiate(
            Standard::Bc12,
            &adapter,
            &cable(Connector::UsbA, Connector::UsbC, 3.0, 20.0, false),
            &usb_c_device(20.0, 9.0, &[Standard::Bc12]),
        );
        assert_eq!(n.voltage, 5.0);
        assert_eq!(n.current, 1.5);
        assert_eq!(n.power, 7.5);
        assert!(!n.usb_a_clamped);
    }

    #[test]
    fn test_negative_inputs_clamped_to_zero() {
        let adapter = usb_c_adapter(-10.0, -5.0, &[Standard::Pd]);
        let n = negotiate(
            Standard::Pd,
            &adapter,
            &c_to_c_cable(3.0, 20.0, false),
            &usb_c_device(20.0, 9.0, &[Standard::Pd]),
        );
        assert_eq!(n.voltage, 0.0);
        assert_eq!(n.current, 0.0);
        assert_eq!(n.power, 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.2222, 2), 2.22);
        assert_eq!(round_to(19.96, 1), 20.0);
    }
}
