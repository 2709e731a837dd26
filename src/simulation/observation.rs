//! Serializable per-step world snapshots

use serde::Serialize;

use crate::core::types::{EncounterKind, Role, Status, Tick, Vec2, VesselId};
use crate::world::state::WorldState;
use crate::world::vessel::Vessel;

/// One vessel's externally visible state at a point in time
#[derive(Debug, Clone, Serialize)]
pub struct VesselObservation {
    pub id: VesselId,
    pub position: Vec2,
    pub destination: Vec2,
    pub heading_deg: f64,
    pub speed_kn: f64,
    pub status: Status,
    pub scenario: Option<EncounterKind>,
    pub role: Option<Role>,
    pub is_avoiding: bool,
    pub arrived: bool,
}

impl From<&Vessel> for VesselObservation {
    fn from(vessel: &Vessel) -> Self {
        Self {
            id: vessel.id,
            position: vessel.position,
            destination: vessel.destination,
            heading_deg: vessel.heading(),
            speed_kn: vessel.speed(),
            status: vessel.status(),
            scenario: vessel.scenario(),
            role: vessel.role(),
            is_avoiding: vessel.is_avoiding(),
            arrived: vessel.reached_destination(),
        }
    }
}

/// Full world snapshot, one per step when structured output is on
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub time_step: Tick,
    pub vessels: Vec<VesselObservation>,
}

impl Observation {
    pub fn capture(world: &WorldState) -> Self {
        Self {
            time_step: world.time_step,
            vessels: world.vessels.iter().map(VesselObservation::from).collect(),
        }
    }
}
