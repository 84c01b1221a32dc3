//! Charge-Time Estimator
//!
//! Simplified model: time to charge the 20% → 80% window at the negotiated
//! power, derated by a fixed efficiency that is lower for small batteries.

use crate::model::DeviceSpec;

/// Share of capacity covered by the 20% → 80% window.
pub const CHARGE_WINDOW: f64 = 0.6;
/// Batteries below this capacity (Wh) use the small-battery efficiency.
pub const SMALL_BATTERY_WH: f64 = 25.0;
pub const SMALL_BATTERY_EFFICIENCY: f64 = 0.75;
pub const LARGE_BATTERY_EFFICIENCY: f64 = 0.85;
/// Effective power at or below this (W) yields no estimate.
pub const MIN_EFFECTIVE_POWER: f64 = 0.1;

pub fn efficiency_for(capacity_wh: f64) -> f64 {
    if capacity_wh < SMALL_BATTERY_WH {
        SMALL_BATTERY_EFFICIENCY
    } else {
        LARGE_BATTERY_EFFICIENCY
    }
}

/// Estimated minutes for the 20% → 80% window, or `None` when the battery
/// capacity is unknown or the power is negligible.
pub fn estimate_charge_time(negotiated_power: f64, device: &DeviceSpec) -> Option<u32> {
    let capacity = device.battery_capacity_wh()?;
    let energy = capacity * CHARGE_WINDOW;
    let effective = negotiated_power.min(device.max_w) * efficiency_for(capacity);
    if !effective.is_finite() || effective <= MIN_EFFECTIVE_POWER {
        return None;
    }
    let minutes = (energy / effective * 60.0).round();
    Some(minutes as u32)
}
