//! Message templates per locale.
//!
//! Templates use `{name}` placeholders. Parameters named `part` are replaced
//! by the localized component name, `standard` and `alternative` by the
//! standard's label; numbers print with at most two decimals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Message, MessageKey, MessageParam};
use crate::core::ChargeSimError;
use crate::model::Standard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl FromStr for Locale {
    type Err = ChargeSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" | "english" => Ok(Locale::En),
            "zh" | "zh-cn" | "zh_cn" | "chinese" => Ok(Locale::Zh),
            _ => Err(ChargeSimError::UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::Zh => f.write_str("zh"),
        }
    }
}

fn template(key: MessageKey, locale: Locale) -> &'static str {
    use MessageKey::*;
    match locale {
        Locale::En => match key {
            AdapterPortMissing => "The adapter has no {port} port for this cable",
            DeviceConnectorMismatch => "The device needs a {expected} plug but the cable ends in {actual}",
            AdapterStandardUnsupported => "The adapter does not support {standard}",
            DeviceStandardUnsupported => "The device does not support {standard}",
            UsbAStandardDisallowed => "{standard} cannot be negotiated over a USB-A connection",
            EprCableRequired => "EPR requires an e-marked (EPR rated) cable",
            EprVoltageRequired => "EPR requires the {part} to support at least {required}V (it supports {actual}V)",
            NoCommonStandard => "The adapter and device share no charging standard",
            NoCompatibleStandard => "No shared standard can be negotiated with this combination",
            VoltageLimited => "Voltage is limited by the {part} at {value}V",
            CurrentLimited => "Current is limited by the {part} at {value}A",
            PowerLimited => "Power is limited by the {part} at {value}W",
            UsbAVoltageCap => "The USB-A connection caps voltage at {value}V",
            StandardLimited => "{standard} itself caps {quantity} at {value}{unit}",
            BelowRecommended => "Charging at {power}W is below the device's recommended {recommended}W",
            UpgradeCable5A => "At {voltage}V a 5A e-marked cable would allow more current",
            UpgradeAdapter => "Use an adapter rated for at least {recommended}W (current adapter: {adapter_w}W)",
            EprAdapter => "The device supports EPR; an EPR-capable adapter would charge faster",
            EprCable => "Both ends support EPR; an EPR-rated e-marked cable would unlock it",
            SwitchToUsbCPd => "Charging with {standard} over USB-A; a USB-C cable would allow {alternative}",
        },
        Locale::Zh => match key {
            AdapterPortMissing => "充电器没有适合此线缆的 {port} 接口",
            DeviceConnectorMismatch => "设备需要 {expected} 接头，但线缆为 {actual}",
            AdapterStandardUnsupported => "充电器不支持 {standard}",
            DeviceStandardUnsupported => "设备不支持 {standard}",
            UsbAStandardDisallowed => "{standard} 无法通过 USB-A 连接协商",
            EprCableRequired => "EPR 需要带 E-Marker 的 EPR 线缆",
            EprVoltageRequired => "EPR 需要{part}支持至少 {required}V（当前 {actual}V）",
            NoCommonStandard => "充电器与设备没有共同支持的充电协议",
            NoCompatibleStandard => "当前组合无法协商任何共同协议",
            VoltageLimited => "电压受{part}限制：{value}V",
            CurrentLimited => "电流受{part}限制：{value}A",
            PowerLimited => "功率受{part}限制：{value}W",
            UsbAVoltageCap => "USB-A 连接将电压限制在 {value}V",
            StandardLimited => "{standard} 协议本身将{quantity}限制在 {value}{unit}",
            BelowRecommended => "当前 {power}W 低于设备推荐的 {recommended}W",
            UpgradeCable5A => "在 {voltage}V 下，使用 5A E-Marker 线缆可提高电流",
            UpgradeAdapter => "建议使用至少 {recommended}W 的充电器（当前 {adapter_w}W）",
            EprAdapter => "设备支持 EPR，使用支持 EPR 的充电器可更快充电",
            EprCable => "两端均支持 EPR，使用 EPR E-Marker 线缆即可启用",
            SwitchToUsbCPd => "当前通过 USB-A 使用 {standard}；改用 USB-C 线缆可启用 {alternative}",
        },
    }
}

fn part_name(id: &str, locale: Locale) -> String {
    let name = match (locale, id) {
        (Locale::En, "adapter") => "adapter",
        (Locale::En, "cable") => "cable",
        (Locale::En, "device") => "device",
        (Locale::Zh, "adapter") => "充电器",
        (Locale::Zh, "cable") => "线缆",
        (Locale::Zh, "device") => "设备",
        _ => id,
    };
    name.to_string()
}

fn quantity_name(id: &str, locale: Locale) -> String {
    let name = match (locale, id) {
        (Locale::Zh, "voltage") => "电压",
        (Locale::Zh, "current") => "电流",
        _ => id,
    };
    name.to_string()
}

fn format_number(n: f64) -> String {
    let rounded = (n * 100.0).round() / 100.0;
    let mut s = format!("{:.2}", rounded);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

fn format_param(name: &str, value: &MessageParam, locale: Locale) -> String {
    match value {
        MessageParam::Number(n) => format_number(*n),
        MessageParam::Text(t) => match name {
            "part" => part_name(t, locale),
            "quantity" => quantity_name(t, locale),
            "standard" | "alternative" => t
                .parse::<Standard>()
                .map(|s| s.label().to_string())
                .unwrap_or_else(|_| t.clone()),
            _ => t.clone(),
        },
    }
}

/// Render a message descriptor for `locale`. Unknown placeholders are left as-is.
pub fn render(message: &Message, locale: Locale) -> String {
    let mut out = template(message.key, locale).to_string();
    for (name, value) in &message.params {
        let placeholder = format!("{{{}}}", name);
        if out.contains(&placeholder) {
            out = out.replace(&placeholder, &format_param(name, value, locale));
        }
    }
    out
}
