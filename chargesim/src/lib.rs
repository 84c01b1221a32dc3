//! ChargeSim - USB charging negotiation and power estimation library
//!
//! Given a power adapter, a cable and a device, this library picks the best
//! mutually supported charging standard, estimates the negotiated voltage,
//! current and power, explains which component is the bottleneck and
//! suggests upgrades.
//!
//! # Quick Start
//!
//! ```no_run
//! use chargesim::prelude::*;
//!
//! let catalog = Catalog::builtin();
//! let adapter = catalog.adapter(&"Apple 20W USB-C".parse().unwrap()).unwrap();
//! let cable = catalog.cable(&"USB-C to Lightning".parse().unwrap()).unwrap();
//! let device = catalog.device(&"iPhone 8".parse().unwrap()).unwrap();
//!
//! let result = ChargeSimCore::simulate(adapter, cable, device, &SimulationOptions::default());
//!
//! println!("{:?}: {}W", result.standard, result.power);
//! for bottleneck in &result.bottlenecks {
//!     println!("{}", render(bottleneck, Locale::En));
//! }
//! ```
//!
//! # Features
//!
//! - **Standard selection**: PD 3.1 EPR, PD 3.0 PPS, PD 3.0, QC 3.0, Apple 2.4A, BC 1.2
//! - **Compatibility checks**: connectors, USB-A restrictions, EPR prerequisites
//! - **Diagnostics**: bottlenecks and suggestions as locale-neutral message descriptors
//! - **Charge-time estimate**: 20% → 80% window from battery capacity

pub mod catalog;
pub mod core;
pub mod engine;
pub mod messages;
pub mod model;

// Re-export main types
pub use crate::core::{ChargeSimCore, ChargeSimError, Scenario, SimulationOptions, SimulationResult};
pub use catalog::{Catalog, PresetSelector};
pub use messages::{render, Locale, Message, MessageKey, MessageParam};
pub use model::{
    AdapterOverrides, AdapterSpec, CableOverrides, CableSpec, Connector, DeviceOverrides,
    DeviceSpec, Part, Port, Standard, StandardSelection,
};

/// Run a simulation with Auto selection (convenience wrapper).
pub fn simulate(adapter: &AdapterSpec, cable: &CableSpec, device: &DeviceSpec) -> SimulationResult {
    ChargeSimCore::simulate(adapter, cable, device, &SimulationOptions::default())
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        render, AdapterSpec, CableSpec, Catalog, ChargeSimCore, ChargeSimError, Connector,
        DeviceSpec, Locale, Message, MessageKey, Part, Port, PresetSelector, SimulationOptions,
        SimulationResult, Standard, StandardSelection,
    };
}
