//! Charging standards and the selection directive.
//!
//! The declaration order of [`Standard`] is the automatic-selection priority
//! (most capable first), so `Ord` and `BTreeSet` iteration follow it directly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::core::ChargeSimError;

/// Voltage every USB contract starts from and falls back to.
pub const DEFAULT_VOLTAGE: f64 = 5.0;

/// A charging negotiation protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Standard {
    #[serde(rename = "pd_epr", alias = "PD 3.1 EPR", alias = "PD3.1 EPR")]
    PdEpr,
    #[serde(rename = "pd_pps", alias = "PD 3.0 PPS", alias = "PPS")]
    PdPps,
    #[serde(rename = "pd", alias = "PD 3.0", alias = "PD")]
    Pd,
    #[serde(rename = "qc3", alias = "QC 3.0", alias = "QC3.0")]
    Qc3,
    #[serde(rename = "apple_2_4a", alias = "Apple 2.4A")]
    Apple2_4A,
    #[serde(rename = "bc12", alias = "BC 1.2", alias = "BC1.2")]
    Bc12,
}

/// Fallback when automatic selection finds nothing compatible.
pub const BASELINE_STANDARD: Standard = Standard::Bc12;

impl Standard {
    /// All standards, highest priority first.
    pub const PRIORITY: [Standard; 6] = [
        Standard::PdEpr,
        Standard::PdPps,
        Standard::Pd,
        Standard::Qc3,
        Standard::Apple2_4A,
        Standard::Bc12,
    ];

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Standard::PdEpr => "PD 3.1 EPR",
            Standard::PdPps => "PD 3.0 PPS",
            Standard::Pd => "PD 3.0",
            Standard::Qc3 => "QC 3.0",
            Standard::Apple2_4A => "Apple 2.4A",
            Standard::Bc12 => "BC 1.2",
        }
    }

    /// Stable identifier, identical to the serde name.
    pub fn id(&self) -> &'static str {
        match self {
            Standard::PdEpr => "pd_epr",
            Standard::PdPps => "pd_pps",
            Standard::Pd => "pd",
            Standard::Qc3 => "qc3",
            Standard::Apple2_4A => "apple_2_4a",
            Standard::Bc12 => "bc12",
        }
    }

    /// Lowest voltage the standard negotiates.
    pub fn min_voltage(&self) -> f64 {
        match self {
            Standard::PdEpr => 20.0,
            _ => DEFAULT_VOLTAGE,
        }
    }

    /// Highest voltage the standard negotiates.
    pub fn max_voltage(&self) -> f64 {
        match self {
            Standard::PdEpr => 48.0,
            Standard::PdPps | Standard::Pd => 20.0,
            Standard::Qc3 => 12.0,
            Standard::Apple2_4A | Standard::Bc12 => DEFAULT_VOLTAGE,
        }
    }

    /// Current ceiling the protocol itself allows, in amperes.
    pub fn max_current(&self) -> f64 {
        match self {
            Standard::PdEpr | Standard::PdPps | Standard::Pd => 5.0,
            Standard::Qc3 => 3.0,
            Standard::Apple2_4A => 2.4,
            Standard::Bc12 => 1.5,
        }
    }

    /// USB Power Delivery family.
    pub fn is_power_delivery(&self) -> bool {
        matches!(self, Standard::PdEpr | Standard::PdPps | Standard::Pd)
    }

    /// Legacy and proprietary schemes; the only ones negotiable over USB-A.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Standard::Qc3 | Standard::Apple2_4A | Standard::Bc12)
    }

    /// Position in the priority order, 0 being the most capable.
    pub fn priority(&self) -> usize {
        *self as usize
    }

    /// One-line summary shown by `chargesim standards --verbose`.
    pub fn description(&self) -> &'static str {
        match self {
            Standard::PdEpr => "Extended Power Range, 20-48V; needs an e-marked cable and 28V-capable adapter and device",
            Standard::PdPps => "Programmable Power Supply, fine-grained 5-20V steps",
            Standard::Pd => "USB Power Delivery fixed contracts, 5-20V",
            Standard::Qc3 => "Quick Charge 3.0, up to 12V, works over USB-A",
            Standard::Apple2_4A => "Apple proprietary 5V/2.4A signalling",
            Standard::Bc12 => "USB Battery Charging 1.2, 5V/1.5A baseline",
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Standard {
    type Err = ChargeSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pdepr" | "pd31epr" | "pd31" | "epr" => Ok(Standard::PdEpr),
            "pdpps" | "pd30pps" | "pps" => Ok(Standard::PdPps),
            "pd" | "pd30" | "usbpd" => Ok(Standard::Pd),
            "qc3" | "qc30" | "quickcharge3" => Ok(Standard::Qc3),
            "apple24a" | "apple" | "apple24" => Ok(Standard::Apple2_4A),
            "bc12" | "bc" => Ok(Standard::Bc12),
            _ => Err(ChargeSimError::UnknownStandard(s.to_string())),
        }
    }
}

/// Returns a new set with `standard`'s membership flipped.
pub fn with_standard_toggled(set: &BTreeSet<Standard>, standard: Standard) -> BTreeSet<Standard> {
    let mut next = set.clone();
    if !next.remove(&standard) {
        next.insert(standard);
    }
    next
}

/// Which standard to evaluate: the best compatible one, or an explicit choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StandardSelection {
    #[default]
    Auto,
    Forced(Standard),
}

impl FromStr for StandardSelection {
    type Err = ChargeSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalize(s) == "auto" {
            return Ok(StandardSelection::Auto);
        }
        s.parse().map(StandardSelection::Forced)
    }
}

impl TryFrom<String> for StandardSelection {
    type Error = ChargeSimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StandardSelection> for String {
    fn from(value: StandardSelection) -> Self {
        match value {
            StandardSelection::Auto => "auto".to_string(),
            StandardSelection::Forced(s) => s.id().to_string(),
        }
    }
}

impl fmt::Display for StandardSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandardSelection::Auto => f.write_str("Auto"),
            StandardSelection::Forced(s) => write!(f, "{}", s),
        }
    }
}
