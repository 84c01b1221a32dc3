//! Data model: component descriptors, standards and user overrides.

pub mod overrides;
pub mod spec;
pub mod standard;

pub use overrides::{AdapterOverrides, CableOverrides, DeviceOverrides};
pub use spec::{AdapterSpec, CableSpec, Connector, DeviceSpec, Part, Port, UNMARKED_CABLE_MAX_A};
pub use standard::{
    with_standard_toggled, Standard, StandardSelection, BASELINE_STANDARD, DEFAULT_VOLTAGE,
};
