//! Step driver and simulation events
//!
//! Orchestrates one discrete time step: apply the maneuvers decided last
//! step, advance kinematics, run the avoidance strategy on the new state,
//! then commit its statuses, encounter annotations, and avoidance flags.
//! Actions decided this step take effect at the start of the next one, so
//! every vessel within a step moves on the state it entered the step with.

pub mod observation;
pub mod step;

use serde::Serialize;

use crate::core::types::{EncounterKind, Role, Status, Tick, VesselId};

pub use observation::Observation;
pub use step::Simulation;

/// Everything noteworthy that happened during one step
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimulationEvent {
    /// A vessel's proximity status moved between Green, Orange, and Red
    StatusChanged {
        vessel: VesselId,
        from: Status,
        to: Status,
    },
    /// An at-risk pair was classified and assigned obligations
    EncounterClassified {
        a: VesselId,
        b: VesselId,
        status: Status,
        kind: EncounterKind,
        role_a: Role,
        role_b: Role,
    },
    /// A maneuver was issued; it takes effect at the start of the next step
    ManeuverIssued {
        vessel: VesselId,
        heading_delta_deg: f64,
        speed_delta_kn: f64,
    },
    /// An avoiding vessel's horizon cleared and it steered back on course
    CourseResumed { vessel: VesselId },
    VesselArrived { vessel: VesselId, step: Tick },
    /// Every vessel is within arrival tolerance of its destination
    ScenarioComplete { step: Tick },
}
