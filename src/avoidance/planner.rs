//! Bounded backtracking planner
//!
//! Alternate strategy: instead of a purely reactive turn, search a small
//! space of single-vessel deviations at prior time steps that would defuse a
//! predicted collision, and commit to the first one that works.
//!
//! When a future collision is predicted at horizon step `T` for a give-way
//! vessel, candidate fixes are tried for each back step from `T-1` down to
//! the current step, and for each of the nine discrete maneuvers at that
//! step. Every candidate is simulated on a scratch clone of the world, never
//! the live state; candidates that leave any pair inside the collision
//! distance, or drive the vessel's speed to zero, are rejected and the
//! search moves on (normal control flow, not an error). The search is
//! bounded by `horizon_steps x 9` simulations and completes within the step.
//!
//! Committed fixes are stored as planned overrides keyed by (vessel, step)
//! and emitted as actions when the simulation reaches that step. A vessel
//! with no workable fix simply holds course and is re-evaluated next tick.

use ahash::{AHashMap, AHashSet};

use crate::avoidance::{reactive, AvoidanceStrategy, Decision, EncounterReport};
use crate::colregs::{classifier, predictor, roles};
use crate::core::config::SimulationConfig;
use crate::core::types::{Role, Status, Tick, VesselId};
use crate::world::action::Action;
use crate::world::state::WorldState;

/// The nine discrete planner maneuvers: {slow, hold, speed up} x {port, hold, starboard}
///
/// Enumeration order is fixed; the first workable candidate wins.
fn maneuver_menu(config: &SimulationConfig) -> [(f64, f64); 9] {
    let dv = config.planner_speed_step_kn;
    let dh = config.planner_turn_deg;
    [
        (0.0, 0.0),
        (0.0, dh),
        (0.0, -dh),
        (-dv, 0.0),
        (-dv, dh),
        (-dv, -dh),
        (dv, 0.0),
        (dv, dh),
        (dv, -dh),
    ]
}

/// Search-based avoidance strategy with per-vessel planned overrides
#[derive(Debug, Default)]
pub struct BacktrackingStrategy {
    /// Committed single-step overrides: (vessel, absolute step) -> maneuver
    planned: AHashMap<(VesselId, Tick), Action>,
}

impl BacktrackingStrategy {
    pub fn new() -> Self {
        Self {
            planned: AHashMap::new(),
        }
    }

    /// True when a plan is already committed for this vessel at or after `now`
    fn has_pending_plan(&self, vessel: VesselId, now: Tick) -> bool {
        self.planned
            .keys()
            .any(|&(id, step)| id == vessel && step >= now)
    }

    /// Simulate `plan` on a scratch world from `now` through `until`
    ///
    /// Returns false at the first collision-distance violation or the first
    /// step that leaves the planned vessel without positive speed.
    fn plan_avoids_collision(
        &self,
        world: &WorldState,
        config: &SimulationConfig,
        plan: &AHashMap<(VesselId, Tick), Action>,
        planned_vessel: VesselId,
        now: Tick,
        until: Tick,
    ) -> bool {
        let collision_distance_nm = config.collision_distance_nm();
        let mut scratch = world.clone();

        for step in now..until {
            for vessel in &mut scratch.vessels {
                if let Some(action) = plan.get(&(vessel.id, step)) {
                    if vessel.id == planned_vessel
                        && vessel.speed() + action.speed_delta_kn <= 0.0
                    {
                        return false;
                    }
                    vessel.apply_helm(action.heading_delta_deg);
                    vessel.apply_throttle(action.speed_delta_kn);
                }
            }

            scratch.advance_all(config.step_duration_seconds);

            for i in 0..scratch.vessels.len() {
                for j in (i + 1)..scratch.vessels.len() {
                    let dist = scratch.vessels[i]
                        .position
                        .distance(&scratch.vessels[j].position);
                    if dist < collision_distance_nm {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Try to commit a minimal retroactive fix for `vessel_idx`
    ///
    /// Iterates back steps from the latest first, and the maneuver menu in
    /// its fixed order; the first collision-free candidate is committed.
    fn plan_backtracking(
        &mut self,
        world: &WorldState,
        config: &SimulationConfig,
        vessel_idx: usize,
        collision_step: Tick,
    ) {
        let now = world.time_step;
        let vessel_id = world.vessels[vessel_idx].id;

        let mut back_step = collision_step.saturating_sub(1);
        loop {
            if back_step < now {
                break;
            }
            for (speed_delta, helm_delta) in maneuver_menu(config) {
                let mut candidate = self.planned.clone();
                candidate.insert(
                    (vessel_id, back_step),
                    Action::new(vessel_id, helm_delta, speed_delta),
                );

                if self.plan_avoids_collision(
                    world,
                    config,
                    &candidate,
                    vessel_id,
                    now,
                    collision_step,
                ) {
                    tracing::debug!(
                        vessel = %vessel_id,
                        step = back_step,
                        helm = helm_delta,
                        throttle = speed_delta,
                        "committed planned maneuver"
                    );
                    self.planned = candidate;
                    return;
                }
            }
            if back_step == now {
                break;
            }
            back_step -= 1;
        }

        tracing::debug!(
            vessel = %vessel_id,
            "no workable plan in horizon, holding course"
        );
    }
}

impl AvoidanceStrategy for BacktrackingStrategy {
    fn name(&self) -> &'static str {
        "planner"
    }

    fn decide(&mut self, world: &WorldState, config: &SimulationConfig) -> Decision {
        if world.len() < 2 {
            return Decision::default();
        }

        let sweep = predictor::sweep(world, config);
        let mut decision = Decision {
            statuses: sweep.statuses.clone(),
            ..Default::default()
        };

        for risk in &sweep.risks {
            let a = &world.vessels[risk.a];
            let b = &world.vessels[risk.b];
            let kind = classifier::classify(a, b);
            let (role_a, role_b) = roles::assign_roles(a, b, kind);
            decision.encounters.push(EncounterReport {
                a: a.id,
                b: b.id,
                status: risk.assessment.status,
                kind,
                role_a,
                role_b,
            });

            // Plan only for predicted (Orange) collisions, and only for the
            // obligated vessel; Red is too late for retroactive fixes.
            if risk.assessment.status != Status::Orange {
                continue;
            }
            let Some(first_step) = risk.assessment.first_violation_step else {
                continue;
            };
            let collision_step = world.time_step + first_step;

            for (idx, role) in [(risk.a, role_a), (risk.b, role_b)] {
                let id = world.vessels[idx].id;
                if role == Role::GiveWay && !self.has_pending_plan(id, world.time_step) {
                    self.plan_backtracking(world, config, idx, collision_step);
                }
            }
        }

        // Emit any override that has come due at this step
        let due: Vec<VesselId> = self
            .planned
            .keys()
            .filter(|&&(_, step)| step == world.time_step)
            .map(|&(id, _)| id)
            .collect();
        let mut acted: AHashSet<VesselId> = AHashSet::new();
        for id in due {
            if let Some(action) = self.planned.remove(&(id, world.time_step)) {
                acted.insert(id);
                if !action.is_negligible() {
                    decision.actions.push(action);
                }
            }
        }

        // Steer deviated vessels back onto the direct course once their
        // horizon is clear and no further override is scheduled. If the
        // resume re-creates a risk the next sweep flags it and planning
        // starts over.
        for (i, vessel) in world.vessels.iter().enumerate() {
            if decision.statuses[i] != Status::Green
                || acted.contains(&vessel.id)
                || self.has_pending_plan(vessel.id, world.time_step)
            {
                continue;
            }
            if let Some(action) = reactive::revert_action(vessel) {
                tracing::debug!(vessel = %vessel.id, "plan complete, resuming direct course");
                decision.actions.push(action);
            }
        }

        decision
    }
}
