//! End-to-end simulation tests over presets and scenario files

use chargesim::prelude::*;
use chargesim::{DeviceOverrides, Scenario};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn preset<'a>(
    catalog: &'a Catalog,
    adapter: &str,
    cable: &str,
    device: &str,
) -> (&'a AdapterSpec, &'a CableSpec, &'a DeviceSpec) {
    let adapter = catalog.adapter(&adapter.parse().unwrap()).expect("adapter preset");
    let cable = catalog.cable(&cable.parse().unwrap()).expect("cable preset");
    let device = catalog.device(&device.parse().unwrap()).expect("device preset");
    (adapter, cable, device)
}

#[test]
fn test_pd_phone_on_20w_adapter() {
    let catalog = Catalog::builtin();
    let adapter = catalog.adapter(&"Apple 20W USB-C".parse().unwrap()).unwrap();

    let cable: CableSpec = serde_json::from_str(
        r#"{"name": "C to C", "connectors": ["USB-C", "USB-C"], "max_a": 3.0, "max_v": 20.0}"#,
    )
    .unwrap();
    let device: DeviceSpec = serde_json::from_str(
        r#"{
            "name": "Phone",
            "recommended_w": 20.0,
            "max_w": 30.0,
            "max_v": 9.0,
            "max_a": 3.0,
            "battery_wh": 15.0,
            "standards": ["pd", "apple_2_4a"],
            "connector": "USB-C"
        }"#,
    )
    .unwrap();

    let result = chargesim::simulate(adapter, &cable, &device);

    assert_eq!(result.standard, Some(Standard::Pd));
    assert!(result.power <= 20.5, "power was {}", result.power);
    assert_eq!(result.voltage, 9.0);
    assert_eq!(result.current, 2.22);
    assert!(result.is_limited_by(Part::Adapter));
    assert!(result.has_bottleneck(MessageKey::PowerLimited));
    assert!(result.meets_recommended);
}

#[test]
fn test_forced_epr_laptop_reaches_140w() {
    let scenario = Scenario::from_file(&fixture_path("epr_laptop.json")).expect("Should load scenario");
    assert_eq!(scenario.standard, StandardSelection::Forced(Standard::PdEpr));

    let result = scenario.simulate();

    assert_eq!(result.standard, Some(Standard::PdEpr));
    assert!((result.power - 140.0).abs() <= 2.0, "power was {}", result.power);
    assert_eq!(result.voltage, 28.0);
    assert_eq!(result.current, 5.0);
    assert!(result.incompatibilities.is_empty());
    assert!(result.meets_recommended);
    // 60 Wh at 140 W * 0.85
    assert_eq!(result.charge_minutes, Some(30));
}

#[test]
fn test_forced_apple_over_usb_a_lightning() {
    let catalog = Catalog::builtin();
    let (adapter, cable, device) =
        preset(&catalog, "Apple 12W USB-A", "USB-A to Lightning", "iPhone 8");
    assert!(!adapter.has_port(Port::UsbC));

    let result = ChargeSimCore::simulate(
        adapter,
        cable,
        device,
        &SimulationOptions::forced(Standard::Apple2_4A),
    );

    assert_eq!(result.standard, Some(Standard::Apple2_4A));
    assert!(result.power <= 15.0, "power was {}", result.power);
    assert_eq!(result.voltage, 5.0);
    assert_eq!(result.current, 2.4);
    assert_eq!(result.power, 12.0);
    assert!(result.incompatibilities.is_empty());
}

#[test]
fn test_no_common_standard() {
    let scenario =
        Scenario::from_file(&fixture_path("no_common_standard.json")).expect("Should load scenario");
    assert_eq!(scenario.standard, StandardSelection::Auto);

    let result = scenario.simulate();

    assert_eq!(result.standard, None);
    assert_eq!(result.power, 0.0);
    assert_eq!(result.voltage, 0.0);
    assert_eq!(result.current, 0.0);
    assert_eq!(result.charge_minutes, None);
    assert!(result.has_bottleneck(MessageKey::NoCommonStandard));
    assert_eq!(result.limiting_parts, vec![Part::Adapter, Part::Cable, Part::Device]);
    assert!(result.has_incompatibility(MessageKey::AdapterStandardUnsupported));
    assert!(result.has_incompatibility(MessageKey::DeviceStandardUnsupported));

    let forced = ChargeSimCore::simulate(
        &scenario.adapter,
        &scenario.cable,
        &scenario.device,
        &SimulationOptions::forced(Standard::Pd),
    );
    assert_eq!(forced.standard, None);
    assert!(forced.has_bottleneck(MessageKey::NoCommonStandard));
}

#[test]
fn test_charge_time_from_milliamp_hours() {
    let catalog = Catalog::builtin();
    let (adapter, cable, device) =
        preset(&catalog, "Apple 20W USB-C", "USB-C to USB-C 60W", "iPhone 15");
    assert_eq!(device.battery_wh, None);

    let capacity = device.battery_capacity_wh().expect("capacity from mAh");
    assert!((capacity - 3349.0 * 3.87 / 1000.0).abs() < 1e-9);

    let result = chargesim::simulate(adapter, cable, device);
    assert_eq!(result.power, 20.0);

    let minutes = result.charge_minutes.expect("Should estimate charge time");
    assert!(minutes > 0);
    // 7.78 Wh at 20 W * 0.75
    assert_eq!(minutes, 31);
}

#[test]
fn test_epr_gated_by_unmarked_cable() {
    let catalog = Catalog::builtin();
    let (adapter, cable, device) =
        preset(&catalog, "Apple 140W USB-C", "USB-C to USB-C 60W", "MacBook Pro 16 M3");

    let auto = chargesim::simulate(adapter, cable, device);
    assert_eq!(auto.standard, Some(Standard::Pd));
    assert_eq!(auto.voltage, 20.0);
    assert_eq!(auto.current, 3.0);
    assert_eq!(auto.power, 60.0);
    assert!(auto.has_suggestion(MessageKey::BelowRecommended));
    assert!(auto.has_suggestion(MessageKey::UpgradeCable5A));
    assert!(auto.has_suggestion(MessageKey::EprCable));

    let forced =
        ChargeSimCore::simulate(adapter, cable, device, &SimulationOptions::forced(Standard::PdEpr));
    assert!(!forced.is_compatible());
    assert!(forced.has_incompatibility(MessageKey::EprCableRequired));
}

#[test]
fn test_usb_a_cable_caps_voltage() {
    let catalog = Catalog::builtin();
    for adapter in catalog.adapters.iter().filter(|a| a.has_port(Port::UsbA)) {
        for cable in catalog.cables.iter().filter(|c| c.has_usb_a()) {
            for device in &catalog.devices {
                let result = chargesim::simulate(adapter, cable, device);
                assert!(
                    result.voltage <= 5.0,
                    "{} + {} + {} negotiated {}V",
                    adapter.name,
                    cable.name,
                    device.name,
                    result.voltage
                );
                if let Some(standard) = result.standard {
                    assert!(standard.is_legacy(), "{} over USB-A", standard);
                }
            }
        }
    }
}

#[test]
fn test_qc_adapter_over_usb_a_suggests_usb_c() {
    let catalog = Catalog::builtin();
    let (adapter, cable, device) = preset(&catalog, "Anker 65W GaN", "USB-A to USB-C", "Redmi Note 12");

    let result = chargesim::simulate(adapter, cable, device);

    assert_eq!(result.standard, Some(Standard::Qc3));
    assert_eq!(result.voltage, 5.0);
    assert!(result.has_bottleneck(MessageKey::UsbAVoltageCap));
    let switch = result
        .suggestions
        .iter()
        .find(|m| m.key == MessageKey::SwitchToUsbCPd)
        .expect("Should suggest a USB-C cable");
    assert_eq!(render(switch, Locale::En), "Charging with QC 3.0 over USB-A; a USB-C cable would allow PD 3.0");
}

#[test]
fn test_auto_picks_highest_priority_standard() {
    let catalog = Catalog::builtin();
    let (adapter, cable, device) =
        preset(&catalog, "Anker 65W GaN", "USB-C to USB-C 100W", "Galaxy S24 Ultra");

    let result = chargesim::simulate(adapter, cable, device);
    assert_eq!(result.standard, Some(Standard::PdPps));

    let mut slower = Vec::new();
    for standard in [Standard::Pd, Standard::Bc12] {
        let forced =
            ChargeSimCore::simulate(adapter, cable, device, &SimulationOptions::forced(standard));
        assert!(forced.is_compatible());
        slower.push(forced.power);
    }
    assert!(slower.iter().all(|p| *p <= result.power));
}

#[test]
fn test_power_monotonic_in_adapter_wattage() {
    let catalog = Catalog::builtin();
    let (adapter, cable, device) =
        preset(&catalog, "Apple 140W USB-C", "USB-C to USB-C 240W EPR", "MacBook Pro 16 M3");
    let options = SimulationOptions::forced(Standard::PdEpr);

    let mut previous = 0.0;
    for watts in [10.0, 30.0, 60.0, 96.0, 120.0, 140.0, 200.0] {
        let mut bigger = adapter.clone();
        bigger.max_w = watts;
        let result = ChargeSimCore::simulate(&bigger, cable, device, &options);
        assert!(result.power >= previous, "{}W adapter gave {}W", watts, result.power);
        assert!(result.power <= watts + 1e-9);
        previous = result.power;
    }
}

#[test]
fn test_epr_voltage_threshold_never_lowers_power() {
    let cable: CableSpec = serde_json::from_str(
        r#"{"name": "15V cable", "connectors": ["USB-C", "USB-C"], "max_a": 5.0, "max_v": 15.0, "e_marked": true}"#,
    )
    .unwrap();
    let device: DeviceSpec = serde_json::from_str(
        r#"{
            "name": "Laptop",
            "recommended_w": 100.0,
            "max_w": 140.0,
            "max_v": 28.0,
            "max_a": 5.0,
            "battery_wh": 70.0,
            "standards": ["pd_epr", "pd"],
            "connector": "USB-C"
        }"#,
    )
    .unwrap();
    let adapter = |max_v: f64| AdapterSpec {
        name: format!("{}V brick", max_v),
        max_w: 140.0,
        max_v,
        max_a: None,
        standards: [Standard::PdEpr, Standard::Pd].into_iter().collect(),
        ports: [Port::UsbC].into_iter().collect(),
        note: None,
    };

    let below = chargesim::simulate(&adapter(27.0), &cable, &device);
    assert_eq!(below.standard, Some(Standard::Pd));
    assert_eq!(below.power, 75.0);

    let epr = chargesim::simulate(&adapter(28.0), &cable, &device);
    assert_eq!(epr.standard, Some(Standard::PdEpr));
    assert_eq!(epr.voltage, 15.0);
    assert_eq!(epr.current, 5.0);
    assert_eq!(epr.power, 75.0);
    assert!(epr.is_limited_by(Part::Cable));
    let voltage = epr
        .bottlenecks
        .iter()
        .find(|m| m.key == MessageKey::VoltageLimited)
        .expect("cable voltage bottleneck");
    assert_eq!(voltage.part(), Some(Part::Cable));
}

#[test]
fn test_auto_reports_why_nothing_is_compatible() {
    let catalog = Catalog::builtin();
    let (adapter, cable, device) =
        preset(&catalog, "Apple 20W USB-C", "USB-C to Lightning", "iPhone 15");

    let result = chargesim::simulate(adapter, cable, device);

    assert_eq!(result.standard, None);
    assert_eq!(result.power, 0.0);
    assert_eq!(result.bottlenecks.len(), 1);
    assert!(result.has_bottleneck(MessageKey::NoCompatibleStandard));
    let mismatch = result
        .incompatibilities
        .iter()
        .find(|m| m.key == MessageKey::DeviceConnectorMismatch)
        .expect("connector mismatch reason");
    assert_eq!(
        render(mismatch, Locale::En),
        "The device needs a USB-C plug but the cable ends in Lightning"
    );
}

const VOLT_STEPS: [f64; 9] = [5.0, 9.0, 12.0, 15.0, 20.0, 27.0, 28.0, 36.0, 48.0];
const AMP_STEPS: [f64; 6] = [1.0, 1.5, 2.4, 3.0, 5.0, 6.0];
const WATT_STEPS: [f64; 8] = [5.0, 12.0, 20.0, 30.0, 60.0, 100.0, 140.0, 240.0];

fn assert_non_decreasing(label: &str, powers: impl IntoIterator<Item = f64>) {
    let mut previous = f64::NEG_INFINITY;
    for power in powers {
        assert!(power >= previous, "{}: power fell from {}W to {}W", label, previous, power);
        previous = power;
    }
}

#[test]
fn test_raising_any_ceiling_never_lowers_power() {
    let catalog = Catalog::builtin();
    for adapter in &catalog.adapters {
        for cable in &catalog.cables {
            for device in &catalog.devices {
                let combo = format!("{} + {} + {}", adapter.name, cable.name, device.name);
                let with_adapter = |edit: &dyn Fn(&mut AdapterSpec)| {
                    let mut a = adapter.clone();
                    edit(&mut a);
                    chargesim::simulate(&a, cable, device).power
                };
                let with_cable = |edit: &dyn Fn(&mut CableSpec)| {
                    let mut c = cable.clone();
                    edit(&mut c);
                    chargesim::simulate(adapter, &c, device).power
                };
                let with_device = |edit: &dyn Fn(&mut DeviceSpec)| {
                    let mut d = device.clone();
                    edit(&mut d);
                    chargesim::simulate(adapter, cable, &d).power
                };

                assert_non_decreasing(
                    &format!("{}, adapter max_v", combo),
                    VOLT_STEPS.iter().map(|v| with_adapter(&|a| a.max_v = *v)),
                );
                assert_non_decreasing(
                    &format!("{}, adapter max_a", combo),
                    AMP_STEPS.iter().map(|i| with_adapter(&|a| a.max_a = Some(*i))),
                );
                assert_non_decreasing(
                    &format!("{}, adapter max_w", combo),
                    WATT_STEPS.iter().map(|w| with_adapter(&|a| a.max_w = *w)),
                );

                assert_non_decreasing(
                    &format!("{}, cable max_v", combo),
                    VOLT_STEPS.iter().map(|v| with_cable(&|c| c.max_v = *v)),
                );
                assert_non_decreasing(
                    &format!("{}, cable max_a", combo),
                    AMP_STEPS.iter().map(|i| with_cable(&|c| c.max_a = *i)),
                );
                assert_non_decreasing(
                    &format!("{}, cable max_w", combo),
                    WATT_STEPS.iter().map(|w| with_cable(&|c| c.max_w = Some(*w))),
                );

                assert_non_decreasing(
                    &format!("{}, device max_v", combo),
                    VOLT_STEPS.iter().map(|v| with_device(&|d| d.max_v = *v)),
                );
                assert_non_decreasing(
                    &format!("{}, device max_a", combo),
                    AMP_STEPS.iter().map(|i| with_device(&|d| d.max_a = Some(*i))),
                );
                assert_non_decreasing(
                    &format!("{}, device max_w", combo),
                    WATT_STEPS.iter().map(|w| with_device(&|d| d.max_w = *w)),
                );
            }
        }
    }
}

#[test]
fn test_simulation_is_deterministic() {
    let catalog = Catalog::builtin();
    let (adapter, cable, _) = preset(&catalog, "Anker 65W GaN", "USB-C to USB-C 100W", "iPad Air");
    for device in &catalog.devices {
        let first = chargesim::simulate(adapter, cable, device);
        let second = chargesim::simulate(adapter, cable, device);
        assert_eq!(first, second);
    }
}

#[test]
fn test_power_never_exceeds_any_ceiling() {
    let catalog = Catalog::builtin();
    for adapter in &catalog.adapters {
        for cable in &catalog.cables {
            for device in &catalog.devices {
                let result = chargesim::simulate(adapter, cable, device);
                assert!(result.power <= adapter.max_w + 0.05);
                assert!(result.power <= device.max_w + 0.05);
                if let Some(w) = cable.max_w {
                    assert!(result.power <= w + 0.05);
                }
                if result.standard.is_none() {
                    assert_eq!(result.power, 0.0);
                    assert_eq!(result.limiting_parts.len(), 3);
                }
            }
        }
    }
}

#[test]
fn test_toggled_device_standard_changes_selection() {
    let catalog = Catalog::builtin();
    let (adapter, cable, device) =
        preset(&catalog, "Apple 20W USB-C", "USB-C to USB-C 60W", "iPhone 15");

    let edited = DeviceOverrides::default()
        .toggle_standard(device, Standard::Pd)
        .apply(device);
    assert!(!edited.supports(Standard::Pd));
    assert!(device.supports(Standard::Pd), "preset must stay untouched");

    let result = chargesim::simulate(adapter, cable, &edited);
    assert_eq!(result.standard, Some(Standard::Apple2_4A));
    assert_eq!(result.voltage, 5.0);
    assert_eq!(result.current, 2.4);
    assert_eq!(result.power, 12.0);
    assert!(!result.meets_recommended);
}

#[test]
fn test_result_serializes_message_descriptors() {
    let scenario = Scenario::from_file(&fixture_path("no_common_standard.json")).unwrap();
    let json = serde_json::to_value(scenario.simulate()).unwrap();

    assert_eq!(json["standard"], serde_json::Value::Null);
    assert_eq!(json["selection"], "auto");
    assert_eq!(json["bottlenecks"][0]["key"], "no_common_standard");
    assert_eq!(json["limiting_parts"][0], "adapter");
}
