//! Negotiation and estimation engine.
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌──────────────┐
//! │   Standard   │───▶│ Compatibility │───▶│  Electrical  │
//! │   Selector   │    │    Checker    │    │  Negotiator  │
//! └──────────────┘    └───────────────┘    └──────┬───────┘
//!                                                 │
//!                               ┌─────────────────┴──────────────┐
//!                               ▼                                ▼
//!                       ┌──────────────┐                 ┌──────────────┐
//!                       │ Diagnostics  │                 │ Charge-Time  │
//!                       │  Generator   │                 │  Estimator   │
//!                       └──────────────┘                 └──────────────┘
//! ```
//!
//! Every function here is pure: no I/O, no shared state.

pub mod charge_time;
pub mod compatibility;
pub mod diagnostics;
pub mod negotiator;
pub mod selector;

pub use charge_time::estimate_charge_time;
pub use compatibility::{check_compatibility, Compatibility};
pub use diagnostics::{diagnose, Diagnostics};
pub use negotiator::{negotiate, Negotiation, PartLimits};
pub use selector::{best_compatible_standard, candidate_standards, select_standard};

/// Tolerance for "is this component at its ceiling" comparisons.
pub const EPSILON: f64 = 1e-6;
