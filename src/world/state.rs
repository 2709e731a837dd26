//! World state: the ordered vessel collection plus the step counter
//!
//! The world exclusively owns its vessels. Decision components read kinematic
//! state and return instructions; only the step driver mutates vessels.
//! `WorldState` is `Clone` so the backtracking planner can simulate candidate
//! trajectories on a scratch copy without touching the live world.

use serde::Serialize;

use crate::core::types::{Tick, VesselId};
use crate::world::vessel::Vessel;

#[derive(Debug, Clone, Serialize)]
pub struct WorldState {
    pub vessels: Vec<Vessel>,
    pub time_step: Tick,
}

impl WorldState {
    pub fn new(vessels: Vec<Vessel>) -> Self {
        Self {
            vessels,
            time_step: 0,
        }
    }

    pub fn vessel(&self, id: VesselId) -> Option<&Vessel> {
        self.vessels.iter().find(|v| v.id == id)
    }

    pub fn vessel_mut(&mut self, id: VesselId) -> Option<&mut Vessel> {
        self.vessels.iter_mut().find(|v| v.id == id)
    }

    /// Advance every vessel's position by `delta_seconds`
    pub fn advance_all(&mut self, delta_seconds: f64) {
        for vessel in &mut self.vessels {
            vessel.advance(delta_seconds);
        }
    }

    pub fn increment_time_step(&mut self) {
        self.time_step += 1;
    }

    /// Terminal condition: every vessel within arrival tolerance
    pub fn all_arrived(&self) -> bool {
        self.vessels.iter().all(|v| v.reached_destination())
    }

    /// Fastest max speed across the fleet, for horizon-step derivation
    pub fn fleet_max_speed(&self) -> f64 {
        self.vessels
            .iter()
            .map(|v| v.max_speed_kn)
            .fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }
}
