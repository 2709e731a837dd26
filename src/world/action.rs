//! Maneuver actions emitted by the decision strategies
//!
//! Actions are ephemeral values: produced during a step, applied to the
//! world's vessels by the driver, then discarded. Speed deltas that would
//! push a vessel below zero are clamped at application time, never rejected.

use serde::{Deserialize, Serialize};

use crate::core::types::VesselId;

/// Deltas below this magnitude are treated as no maneuver at all
pub const NEGLIGIBLE_DELTA: f64 = 1e-3;

/// A one-shot heading/speed adjustment for a single vessel
///
/// Positive `heading_delta_deg` turns the vessel to starboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub vessel: VesselId,
    pub heading_delta_deg: f64,
    pub speed_delta_kn: f64,
}

impl Action {
    pub fn new(vessel: VesselId, heading_delta_deg: f64, speed_delta_kn: f64) -> Self {
        Self {
            vessel,
            heading_delta_deg,
            speed_delta_kn,
        }
    }

    /// A pure turn with no speed change
    pub fn turn(vessel: VesselId, heading_delta_deg: f64) -> Self {
        Self::new(vessel, heading_delta_deg, 0.0)
    }

    /// True when both deltas are below the negligible threshold
    pub fn is_negligible(&self) -> bool {
        self.heading_delta_deg.abs() < NEGLIGIBLE_DELTA
            && self.speed_delta_kn.abs() < NEGLIGIBLE_DELTA
    }
}
