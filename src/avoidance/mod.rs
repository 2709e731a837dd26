//! Avoidance decision strategies
//!
//! Both the canonical reactive state machine and the bounded backtracking
//! planner implement [`AvoidanceStrategy`], so the step driver can swap one
//! for the other without touching the predictor, classifier, or role
//! assigner.
//!
//! Strategies never mutate the live world. Each step they return a
//! [`Decision`]: per-vessel statuses, per-pair encounter reports, maneuver
//! actions, and explicit avoidance-flag updates, all committed by the driver.

pub mod planner;
pub mod reactive;

use crate::core::config::SimulationConfig;
use crate::core::types::{EncounterKind, Role, Status, VesselId};
use crate::world::action::Action;
use crate::world::state::WorldState;

pub use planner::BacktrackingStrategy;
pub use reactive::ReactiveStrategy;

/// Classification and obligations for one at-risk vessel pair
#[derive(Debug, Clone, Copy)]
pub struct EncounterReport {
    pub a: VesselId,
    pub b: VesselId,
    pub status: Status,
    pub kind: EncounterKind,
    pub role_a: Role,
    pub role_b: Role,
}

/// Everything a strategy decided for one step
///
/// `statuses` is parallel to the world's vessel list and empty when the
/// decision phase was a no-op (fewer than two vessels).
#[derive(Debug, Clone, Default)]
pub struct Decision {
    pub statuses: Vec<Status>,
    pub encounters: Vec<EncounterReport>,
    pub actions: Vec<Action>,
    /// (vessel, is_avoiding) updates; true marks the start of an avoidance
    /// maneuver, false marks a completed revert to the direct course
    pub avoidance_flags: Vec<(VesselId, bool)>,
}

/// A pluggable collision-avoidance decision engine
pub trait AvoidanceStrategy {
    fn name(&self) -> &'static str;

    /// Evaluate the current world and decide statuses, encounters, and maneuvers
    fn decide(&mut self, world: &WorldState, config: &SimulationConfig) -> Decision;
}
