//! The simulation loop

use ahash::AHashSet;

use crate::avoidance::AvoidanceStrategy;
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::VesselId;
use crate::simulation::SimulationEvent;
use crate::world::action::Action;
use crate::world::state::WorldState;

/// Owns the world and drives it one step at a time
///
/// The strategy is boxed behind [`AvoidanceStrategy`] so the reactive state
/// machine and the backtracking planner are interchangeable at startup.
pub struct Simulation {
    pub world: WorldState,
    config: SimulationConfig,
    strategy: Box<dyn AvoidanceStrategy>,
    /// Maneuvers decided last step, applied at the start of this one
    pending: Vec<Action>,
    arrived: AHashSet<VesselId>,
    complete: bool,
}

impl Simulation {
    pub fn new(
        world: WorldState,
        config: SimulationConfig,
        strategy: Box<dyn AvoidanceStrategy>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            world,
            config,
            strategy,
            pending: Vec::new(),
            arrived: AHashSet::new(),
            complete: false,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Run one step; returns the events it produced
    pub fn step(&mut self) -> Vec<SimulationEvent> {
        let mut events = Vec::new();

        // 1. Commit the maneuvers decided on the previous step.
        for action in std::mem::take(&mut self.pending) {
            if let Some(vessel) = self.world.vessel_mut(action.vessel) {
                vessel.apply_helm(action.heading_delta_deg);
                vessel.apply_throttle(action.speed_delta_kn);
            }
        }

        // 2. Advance every vessel on the state it entered the step with.
        self.world
            .advance_all(self.config.step_duration_seconds);

        // 3. Decide on the post-movement state; the strategy never mutates
        //    the world, everything it wants happens through the decision.
        let decision = self.strategy.decide(&self.world, &self.config);

        for (i, &status) in decision.statuses.iter().enumerate() {
            let vessel = &mut self.world.vessels[i];
            let previous = vessel.status();
            if previous != status {
                events.push(SimulationEvent::StatusChanged {
                    vessel: vessel.id,
                    from: previous,
                    to: status,
                });
            }
            vessel.set_status(status);
        }

        for report in &decision.encounters {
            events.push(SimulationEvent::EncounterClassified {
                a: report.a,
                b: report.b,
                status: report.status,
                kind: report.kind,
                role_a: report.role_a,
                role_b: report.role_b,
            });
            if let Some(vessel) = self.world.vessel_mut(report.a) {
                vessel.set_encounter(report.kind, report.role_a);
            }
            if let Some(vessel) = self.world.vessel_mut(report.b) {
                vessel.set_encounter(report.kind, report.role_b);
            }
        }

        for &(id, avoiding) in &decision.avoidance_flags {
            if let Some(vessel) = self.world.vessel_mut(id) {
                vessel.set_avoiding(avoiding);
                if !avoiding {
                    events.push(SimulationEvent::CourseResumed { vessel: id });
                }
            }
        }

        // 4. Queue this step's maneuvers; they land next step.
        for action in &decision.actions {
            events.push(SimulationEvent::ManeuverIssued {
                vessel: action.vessel,
                heading_delta_deg: action.heading_delta_deg,
                speed_delta_kn: action.speed_delta_kn,
            });
        }
        self.pending = decision.actions;

        for vessel in &self.world.vessels {
            if vessel.reached_destination() && self.arrived.insert(vessel.id) {
                tracing::info!(vessel = %vessel.id, step = self.world.time_step, "arrived");
                events.push(SimulationEvent::VesselArrived {
                    vessel: vessel.id,
                    step: self.world.time_step,
                });
            }
        }

        self.world.increment_time_step();

        if !self.complete && self.world.all_arrived() {
            self.complete = true;
            events.push(SimulationEvent::ScenarioComplete {
                step: self.world.time_step,
            });
        }

        events
    }

    /// Step until every vessel arrives or `max_steps` elapse
    pub fn run(&mut self, max_steps: u64) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        for _ in 0..max_steps {
            if self.complete {
                break;
            }
            events.extend(self.step());
        }
        events
    }
}
