//! Simulation configuration with documented constants
//!
//! All tunable values are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SearoomError};
use crate::core::types::{METERS_PER_NM, SECONDS_PER_HOUR};

/// Configuration for the collision-avoidance engine
///
/// Distances are planar nautical-mile distances; the flat-earth
/// approximation holds at the scales these scenarios run at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === PROXIMITY THRESHOLDS ===
    /// Radius of each vessel's safety zone, in meters
    ///
    /// Two vessels are in violation when their zones overlap, so the
    /// collision distance is twice this radius. See `collision_distance_nm`.
    pub safety_zone_radius_m: f64,

    /// Maximum look-ahead distance, in nautical miles
    ///
    /// Pairs currently farther apart than this are mutually clear and skip
    /// collision evaluation entirely. This bounds per-step work to nearby
    /// traffic.
    pub horizon_nm: f64,

    // === TIME DISCRETIZATION ===
    /// Simulated seconds advanced per discrete step
    ///
    /// Also the spacing of future-position samples in the predictor; smaller
    /// values tighten trigger timing at the cost of more samples per pair.
    pub step_duration_seconds: f64,

    // === REACTIVE MANEUVERS ===
    /// Starboard turn commanded to both vessels on an immediate (Red) violation, degrees
    pub red_turn_deg: f64,

    /// Speed reduction commanded to both vessels on an immediate (Red) violation, knots
    pub red_slow_kn: f64,

    /// Starboard turn commanded to give-way vessels on a predicted (Orange) violation, degrees
    pub orange_turn_deg: f64,

    // === BACKTRACKING PLANNER ===
    /// Heading change per discrete planner action, degrees
    pub planner_turn_deg: f64,

    /// Speed change per discrete planner action, knots
    pub planner_speed_step_kn: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            safety_zone_radius_m: 200.0,
            horizon_nm: 5.0,
            step_duration_seconds: 30.0,
            red_turn_deg: 20.0,
            red_slow_kn: 3.0,
            orange_turn_deg: 15.0,
            planner_turn_deg: 15.0,
            planner_speed_step_kn: 2.0,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance below which two vessels are in violation, in nautical miles
    ///
    /// Twice the safety-zone radius: both vessels' bubbles must stay disjoint.
    pub fn collision_distance_nm(&self) -> f64 {
        2.0 * self.safety_zone_radius_m / METERS_PER_NM
    }

    /// Number of forward samples needed to cover the horizon at full speed
    ///
    /// `ceil(horizon_nm / (max_speed * step / 3600))` when the fleet can move,
    /// else 0 (future sampling disabled, immediate check only).
    pub fn horizon_steps(&self, max_speed_knots: f64) -> u64 {
        if max_speed_knots <= 0.0 {
            return 0;
        }
        let nm_per_step = max_speed_knots * self.step_duration_seconds / SECONDS_PER_HOUR;
        if nm_per_step <= 0.0 {
            return 0;
        }
        (self.horizon_nm / nm_per_step).ceil() as u64
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.safety_zone_radius_m <= 0.0 {
            return Err(SearoomError::InvalidConfig(format!(
                "safety_zone_radius_m ({}) must be positive",
                self.safety_zone_radius_m
            )));
        }

        if self.horizon_nm <= 0.0 {
            return Err(SearoomError::InvalidConfig(format!(
                "horizon_nm ({}) must be positive",
                self.horizon_nm
            )));
        }

        if self.step_duration_seconds <= 0.0 {
            return Err(SearoomError::InvalidConfig(format!(
                "step_duration_seconds ({}) must be positive",
                self.step_duration_seconds
            )));
        }

        // The horizon must reach beyond the collision distance or the
        // predictor can never raise Orange before Red.
        if self.horizon_nm <= self.collision_distance_nm() {
            return Err(SearoomError::InvalidConfig(format!(
                "horizon_nm ({}) should exceed collision distance ({:.3})",
                self.horizon_nm,
                self.collision_distance_nm()
            )));
        }

        if self.red_turn_deg <= 0.0 || self.orange_turn_deg <= 0.0 {
            return Err(SearoomError::InvalidConfig(
                "maneuver turn angles must be positive".into(),
            ));
        }

        if self.planner_turn_deg <= 0.0 || self.planner_speed_step_kn <= 0.0 {
            return Err(SearoomError::InvalidConfig(
                "planner maneuver steps must be positive".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_collision_distance_is_twice_radius() {
        let config = SimulationConfig {
            safety_zone_radius_m: 185.2,
            ..Default::default()
        };
        assert!((config.collision_distance_nm() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_horizon_steps_derivation() {
        let config = SimulationConfig {
            horizon_nm: 5.0,
            step_duration_seconds: 30.0,
            ..Default::default()
        };
        // 20 kn covers 1/6 NM per 30 s step; 5 NM needs 30 steps.
        assert_eq!(config.horizon_steps(20.0), 30);
    }

    #[test]
    fn test_horizon_steps_zero_speed() {
        let config = SimulationConfig::default();
        assert_eq!(config.horizon_steps(0.0), 0);
        assert_eq!(config.horizon_steps(-5.0), 0);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut config = SimulationConfig::default();
        config.safety_zone_radius_m = 0.0;
        assert!(config.validate().is_err());

        // Horizon not reaching beyond the collision distance is inconsistent
        let mut config = SimulationConfig::default();
        config.safety_zone_radius_m = 5.0 * 1852.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_planner_steps_must_be_positive() {
        // A zero step collapses the planner's maneuver menu
        let mut config = SimulationConfig::default();
        config.planner_turn_deg = 0.0;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.planner_speed_step_kn = -1.0;
        assert!(config.validate().is_err());
    }
}
