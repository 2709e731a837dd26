//! Geometric collision predictor
//!
//! Detects present and future close approaches between vessel pairs by
//! sampling straight-line forward projections at discrete time offsets.
//! All distances are planar Euclidean distances in nautical miles.

use crate::core::config::SimulationConfig;
use crate::core::types::Status;
use crate::world::state::WorldState;
use crate::world::vessel::Vessel;

/// Outcome of assessing one vessel pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairAssessment {
    pub status: Status,
    /// First sampled step (1-based) at which the threshold is violated.
    /// `None` for Green; also `None` for Red, where the violation is current.
    pub first_violation_step: Option<u64>,
}

impl PairAssessment {
    pub const CLEAR: Self = Self {
        status: Status::Green,
        first_violation_step: None,
    };
}

/// An at-risk pair found during a sweep, by index into the world's vessel list
#[derive(Debug, Clone, Copy)]
pub struct PairRisk {
    pub a: usize,
    pub b: usize,
    pub assessment: PairAssessment,
}

/// Per-vessel statuses plus the at-risk pairs behind them
///
/// Computed into a scratch buffer before any vessel is touched, so results
/// never depend on pair evaluation order.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Parallel to the world's vessel list; most severe result across pairs
    pub statuses: Vec<Status>,
    pub risks: Vec<PairRisk>,
}

/// True iff the current distance is inside the collision distance
pub fn check_immediate(a: &Vessel, b: &Vessel, collision_distance_nm: f64) -> bool {
    a.position.distance(&b.position) < collision_distance_nm
}

/// First future sample at which the pair violates the collision distance
///
/// Samples `k * step_seconds` for `k in 1..=horizon_steps`; the zeroth
/// position is already covered by the immediate check. With
/// `horizon_steps == 0` (motionless fleet) no sampling happens at all.
pub fn check_future(
    a: &Vessel,
    b: &Vessel,
    collision_distance_nm: f64,
    horizon_steps: u64,
    step_seconds: f64,
) -> Option<u64> {
    for k in 1..=horizon_steps {
        let t = k as f64 * step_seconds;
        let pa = a.predict_position(t);
        let pb = b.predict_position(t);
        if pa.distance(&pb) < collision_distance_nm {
            return Some(k);
        }
    }
    None
}

/// Assess one pair: Red for an immediate violation, Orange for a future one,
/// Green otherwise
///
/// Pairs currently farther apart than `horizon_nm` are reported clear without
/// any evaluation; collision risk is only tracked for nearby traffic.
pub fn assess_pair(
    a: &Vessel,
    b: &Vessel,
    config: &SimulationConfig,
    horizon_steps: u64,
) -> PairAssessment {
    if a.position.distance(&b.position) > config.horizon_nm {
        return PairAssessment::CLEAR;
    }

    let collision_distance_nm = config.collision_distance_nm();
    if check_immediate(a, b, collision_distance_nm) {
        return PairAssessment {
            status: Status::Red,
            first_violation_step: None,
        };
    }

    if let Some(step) = check_future(
        a,
        b,
        collision_distance_nm,
        horizon_steps,
        config.step_duration_seconds,
    ) {
        return PairAssessment {
            status: Status::Orange,
            first_violation_step: Some(step),
        };
    }

    PairAssessment::CLEAR
}

/// Evaluate every vessel pair and fold per-vessel statuses by severity
pub fn sweep(world: &WorldState, config: &SimulationConfig) -> SweepResult {
    let n = world.vessels.len();
    let mut statuses = vec![Status::Green; n];
    let mut risks = Vec::new();

    if n < 2 {
        return SweepResult { statuses, risks };
    }

    let horizon_steps = config.horizon_steps(world.fleet_max_speed());

    for i in 0..n {
        for j in (i + 1)..n {
            let assessment = assess_pair(&world.vessels[i], &world.vessels[j], config, horizon_steps);
            if assessment.status.is_at_risk() {
                statuses[i] = statuses[i].max(assessment.status);
                statuses[j] = statuses[j].max(assessment.status);
                risks.push(PairRisk { a: i, b: j, assessment });
            }
        }
    }

    SweepResult { statuses, risks }
}
