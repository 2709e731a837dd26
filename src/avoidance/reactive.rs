//! Reactive avoidance state machine
//!
//! Per-vessel controller with two states, Clear and Avoiding:
//!
//! - Clear -> Avoiding: a pair turns Red or Orange and neither member is
//!   already avoiding. Red commands a starboard turn plus a speed cut to
//!   both vessels regardless of scenario; Orange commands a starboard turn
//!   to the give-way vessel(s) only.
//! - Avoiding -> Avoiding: while a vessel is avoiding no further action is
//!   issued, even if the pair stays Red/Orange. One incident, one maneuver.
//! - Avoiding -> Clear: only once the vessel's entire forward horizon checks
//!   clear. Emits a revert action steering back onto the direct bearing to
//!   the destination at max speed, skipped when the deltas are negligible.
//!
//! Revert evaluation runs before new-trigger evaluation: a vessel whose
//! incident just cleared reverts this step and is reconsidered for fresh
//! risks on the next one.

use ahash::AHashSet;

use crate::avoidance::{AvoidanceStrategy, Decision, EncounterReport};
use crate::colregs::{classifier, predictor, roles};
use crate::core::config::SimulationConfig;
use crate::core::types::{normalize_signed, Role, Status, VesselId};
use crate::world::action::Action;
use crate::world::state::WorldState;
use crate::world::vessel::Vessel;

/// The canonical COLREGS-reactive strategy; stateless between steps
#[derive(Debug, Default)]
pub struct ReactiveStrategy;

impl ReactiveStrategy {
    pub fn new() -> Self {
        Self
    }
}

/// Action that steers a vessel back onto the direct course to its destination
///
/// Helm delta is the signed shortest turn from the current heading to the
/// direct bearing; throttle delta restores max speed. Returns `None` when
/// both deltas are negligible (the vessel never meaningfully deviated), or
/// when the vessel has already arrived and no meaningful bearing exists.
pub fn revert_action(vessel: &Vessel) -> Option<Action> {
    if vessel.reached_destination() {
        return None;
    }
    let helm = normalize_signed(vessel.heading() - vessel.bearing_to_destination());
    let throttle = vessel.max_speed_kn - vessel.speed();
    let action = Action::new(vessel.id, helm, throttle);
    if action.is_negligible() {
        None
    } else {
        Some(action)
    }
}

impl AvoidanceStrategy for ReactiveStrategy {
    fn name(&self) -> &'static str {
        "reactive"
    }

    fn decide(&mut self, world: &WorldState, config: &SimulationConfig) -> Decision {
        // Pairwise algorithm: fewer than two vessels means nothing to decide
        if world.len() < 2 {
            return Decision::default();
        }

        let sweep = predictor::sweep(world, config);
        let mut decision = Decision {
            statuses: sweep.statuses.clone(),
            ..Default::default()
        };

        // Phase 1 - reverts take priority over new triggers. A vessel is
        // revert-eligible when every one of its pairs checks clear across
        // the full horizon, which is exactly a Green sweep result.
        let mut reverted: AHashSet<VesselId> = AHashSet::new();
        for (i, vessel) in world.vessels.iter().enumerate() {
            if vessel.is_avoiding() && sweep.statuses[i] == Status::Green {
                if let Some(action) = revert_action(vessel) {
                    tracing::debug!(
                        vessel = %vessel.id,
                        helm = action.heading_delta_deg,
                        throttle = action.speed_delta_kn,
                        "horizon clear, resuming direct course"
                    );
                    decision.actions.push(action);
                }
                decision.avoidance_flags.push((vessel.id, false));
                reverted.insert(vessel.id);
            }
        }

        // Phase 2 - classify at-risk pairs and trigger one-time maneuvers.
        // `engaged` tracks vessels already avoiding, plus ones commanded this
        // step, so overlapping pairs cannot compound maneuvers.
        let mut engaged: AHashSet<VesselId> = world
            .vessels
            .iter()
            .filter(|v| v.is_avoiding())
            .map(|v| v.id)
            .collect();

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

            // No new trigger while either member is mid-incident, and a
            // vessel that reverted this step waits for the next evaluation.
            if engaged.contains(&a.id)
                || engaged.contains(&b.id)
                || reverted.contains(&a.id)
                || reverted.contains(&b.id)
            {
                continue;
            }

            match risk.assessment.status {
                Status::Red => {
                    // Immediate danger overrides COLREGS nuance: both turn
                    // starboard and slow down.
                    for vessel in [a, b] {
                        decision.actions.push(Action::new(
                            vessel.id,
                            config.red_turn_deg,
                            -config.red_slow_kn,
                        ));
                        decision.avoidance_flags.push((vessel.id, true));
                        engaged.insert(vessel.id);
                    }
                }
                Status::Orange => {
                    // Only give-way vessels maneuver; head-on assigns
                    // give-way to both, so both turn.
                    for (vessel, role) in [(a, role_a), (b, role_b)] {
                        if role == Role::GiveWay {
                            decision
                                .actions
                                .push(Action::turn(vessel.id, config.orange_turn_deg));
                            decision.avoidance_flags.push((vessel.id, true));
                            engaged.insert(vessel.id);
                        }
                    }
                }
                Status::Green => {}
            }
        }

        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;

    fn config() -> SimulationConfig {
        SimulationConfig {
            safety_zone_radius_m: 185.2, // collision distance 0.2 NM
            horizon_nm: 5.0,
            step_duration_seconds: 30.0,
            ..Default::default()
        }
    }

    fn head_on_world(gap_nm: f64) -> WorldState {
        WorldState::new(vec![
            Vessel::new(VesselId(0), Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 20.0),
            Vessel::new(
                VesselId(1),
                Vec2::new(gap_nm, 0.0),
                Vec2::new(gap_nm - 10.0, 0.0),
                20.0,
            ),
        ])
    }

    #[test]
    fn test_single_vessel_is_noop() {
        let world = WorldState::new(vec![Vessel::new(
            VesselId(0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            20.0,
        )]);
        let decision = ReactiveStrategy::new().decide(&world, &config());
        assert!(decision.statuses.is_empty());
        assert!(decision.actions.is_empty());
    }

    #[test]
    fn test_orange_head_on_turns_both() {
        let world = head_on_world(3.0);
        let decision = ReactiveStrategy::new().decide(&world, &config());
        assert_eq!(decision.statuses, vec![Status::Orange, Status::Orange]);
        assert_eq!(decision.actions.len(), 2);
        for action in &decision.actions {
            assert_eq!(action.heading_delta_deg, config().orange_turn_deg);
            assert_eq!(action.speed_delta_kn, 0.0);
        }
        assert_eq!(decision.avoidance_flags.len(), 2);
        assert!(decision.avoidance_flags.iter().all(|&(_, f)| f));
    }

    #[test]
    fn test_red_turns_and_slows_both() {
        let world = head_on_world(0.1);
        let decision = ReactiveStrategy::new().decide(&world, &config());
        assert_eq!(decision.statuses, vec![Status::Red, Status::Red]);
        assert_eq!(decision.actions.len(), 2);
        for action in &decision.actions {
            assert_eq!(action.heading_delta_deg, config().red_turn_deg);
            assert_eq!(action.speed_delta_kn, -config().red_slow_kn);
        }
    }

    #[test]
    fn test_no_retrigger_while_avoiding() {
        let mut world = head_on_world(3.0);
        world.vessels[0].set_avoiding(true);
        world.vessels[1].set_avoiding(true);
        let decision = ReactiveStrategy::new().decide(&world, &config());
        assert_eq!(decision.statuses, vec![Status::Orange, Status::Orange]);
        assert!(decision.actions.is_empty(), "avoiding vessels must not re-trigger");
        assert!(decision.avoidance_flags.is_empty());
    }

    #[test]
    fn test_orange_crossing_only_give_way_turns() {
        // B approaches from A's starboard on a converging crossing course
        let mut world = WorldState::new(vec![
            Vessel::new(VesselId(0), Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 15.0),
            Vessel::new(VesselId(1), Vec2::new(1.5, -1.5), Vec2::new(1.5, 8.5), 15.0),
        ]);
        world.time_step = 0;
        let decision = ReactiveStrategy::new().decide(&world, &config());
        assert_eq!(decision.statuses[0], Status::Orange);
        assert_eq!(decision.actions.len(), 1);
        assert_eq!(decision.actions[0].vessel, VesselId(0));
        assert_eq!(decision.avoidance_flags, vec![(VesselId(0), true)]);
    }

    #[test]
    fn test_revert_when_horizon_clears() {
        // Diverging pair, far apart, but still flagged avoiding
        let mut world = WorldState::new(vec![
            Vessel::new(VesselId(0), Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 20.0),
            Vessel::new(VesselId(1), Vec2::new(0.0, 10.0), Vec2::new(0.0, 20.0), 20.0),
        ]);
        world.vessels[0].set_avoiding(true);
        // Vessel deviated 15 degrees to starboard earlier in the incident
        world.vessels[0].apply_helm(15.0);
        let decision = ReactiveStrategy::new().decide(&world, &config());
        assert_eq!(decision.avoidance_flags, vec![(VesselId(0), false)]);
        assert_eq!(decision.actions.len(), 1);
        // Revert turns back to port (negative starboard delta)
        assert!(decision.actions[0].heading_delta_deg < 0.0);
    }

    #[test]
    fn test_revert_without_deviation_clears_flag_silently() {
        let mut world = WorldState::new(vec![
            Vessel::new(VesselId(0), Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 20.0),
            Vessel::new(VesselId(1), Vec2::new(0.0, 10.0), Vec2::new(0.0, 20.0), 20.0),
        ]);
        world.vessels[0].set_avoiding(true);
        let decision = ReactiveStrategy::new().decide(&world, &config());
        // Already on the direct course at max speed: flag clears, no action
        assert_eq!(decision.avoidance_flags, vec![(VesselId(0), false)]);
        assert!(decision.actions.is_empty());
    }

    #[test]
    fn test_no_revert_maneuver_for_arrived_vessel() {
        // Arrived vessel sitting on its destination with an off-axis route
        // heading: the flag clears without a spurious turn toward heading 0.
        let mut world = WorldState::new(vec![
            Vessel::new(VesselId(0), Vec2::new(0.0, 0.0), Vec2::new(0.0, 5.0), 20.0),
            Vessel::new(VesselId(1), Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0), 20.0),
        ]);
        world.vessels[0].position = world.vessels[0].destination;
        world.vessels[0].set_avoiding(true);
        let decision = ReactiveStrategy::new().decide(&world, &config());
        assert_eq!(decision.avoidance_flags, vec![(VesselId(0), false)]);
        assert!(decision.actions.is_empty());
    }

    #[test]
    fn test_revert_takes_priority_over_new_trigger() {
        // Vessel 0's old incident has cleared; vessel 1 and 2 converge
        // nearby, but vessel 0 itself must revert, not re-trigger.
        let mut world = WorldState::new(vec![
            Vessel::new(VesselId(0), Vec2::new(0.0, 6.0), Vec2::new(10.0, 6.0), 20.0),
            Vessel::new(VesselId(1), Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 20.0),
            Vessel::new(VesselId(2), Vec2::new(3.0, 0.0), Vec2::new(-7.0, 0.0), 20.0),
        ]);
        world.vessels[0].set_avoiding(true);
        world.vessels[0].apply_helm(15.0);
        let decision = ReactiveStrategy::new().decide(&world, &config());
        let flags: Vec<_> = decision.avoidance_flags.iter().cloned().collect();
        assert!(flags.contains(&(VesselId(0), false)));
        assert!(flags.contains(&(VesselId(1), true)));
        assert!(flags.contains(&(VesselId(2), true)));
    }
}
