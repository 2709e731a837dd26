//! Vessel kinematic state and COLREGS annotations
//!
//! A vessel transits in a straight line from source toward destination at a
//! clamped speed. Heading, direction vector, and speed are kept mutually
//! consistent through the setters here; avoidance maneuvers change heading
//! and speed, the destination never changes.

use serde::Serialize;

use crate::core::types::{
    direction_to_heading, heading_to_direction, normalize_heading, EncounterKind, Role, Status,
    Vec2, VesselId, SECONDS_PER_HOUR,
};

/// A vessel is "arrived" within this distance of its destination, in NM
pub const ARRIVAL_TOLERANCE_NM: f64 = 0.1;

/// A single vessel's kinematic state plus COLREGS bookkeeping
///
/// Not deserializable: the private kinematic fields are kept mutually
/// consistent by the setters, and vessels are only ever built from a
/// scenario's route specs.
#[derive(Debug, Clone, Serialize)]
pub struct Vessel {
    pub id: VesselId,
    /// Current position in nautical-mile coordinates
    pub position: Vec2,
    pub source: Vec2,
    pub destination: Vec2,
    pub max_speed_kn: f64,
    /// Degrees in [0, 360), atan2 convention
    heading_deg: f64,
    /// Unit vector matching `heading_deg` (zero when source == destination)
    direction: Vec2,
    speed_kn: f64,
    status: Status,
    scenario: Option<EncounterKind>,
    role: Option<Role>,
    is_avoiding: bool,
    in_danger: bool,
}

impl Vessel {
    /// Create a vessel at its source, heading toward its destination at max speed
    pub fn new(id: VesselId, source: Vec2, destination: Vec2, max_speed_kn: f64) -> Self {
        let direction = (destination - source).normalize();
        let heading_deg = direction_to_heading(direction);
        Self {
            id,
            position: source,
            source,
            destination,
            max_speed_kn: max_speed_kn.max(0.0),
            heading_deg,
            direction,
            speed_kn: max_speed_kn.max(0.0),
            status: Status::Green,
            scenario: None,
            role: None,
            is_avoiding: false,
            in_danger: false,
        }
    }

    pub fn heading(&self) -> f64 {
        self.heading_deg
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn speed(&self) -> f64 {
        self.speed_kn
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn scenario(&self) -> Option<EncounterKind> {
        self.scenario
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_avoiding(&self) -> bool {
        self.is_avoiding
    }

    pub fn in_danger(&self) -> bool {
        self.in_danger
    }

    /// Set proximity status; `in_danger` is derived and kept consistent here
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        self.in_danger = status.is_at_risk();
        if !status.is_at_risk() {
            self.scenario = None;
            self.role = None;
        }
    }

    pub fn set_encounter(&mut self, scenario: EncounterKind, role: Role) {
        self.scenario = Some(scenario);
        self.role = Some(role);
    }

    pub fn set_avoiding(&mut self, avoiding: bool) {
        self.is_avoiding = avoiding;
    }

    /// Set an absolute heading; direction vector is recomputed to match
    pub fn set_heading(&mut self, heading_deg: f64) {
        self.heading_deg = normalize_heading(heading_deg);
        self.direction = heading_to_direction(self.heading_deg);
    }

    /// Apply a helm order in degrees; positive turns to starboard
    ///
    /// Headings are stored counterclockwise-positive (atan2 convention), so a
    /// starboard (clockwise) turn subtracts from the stored heading.
    pub fn apply_helm(&mut self, delta_deg: f64) {
        self.set_heading(self.heading_deg - delta_deg);
    }

    /// Apply a speed delta in knots, clamped to [0, max_speed]
    pub fn apply_throttle(&mut self, delta_kn: f64) {
        self.speed_kn = (self.speed_kn + delta_kn).clamp(0.0, self.max_speed_kn);
    }

    /// Advance along the current direction for `elapsed_seconds`
    ///
    /// Snaps exactly onto the destination when the remaining distance is
    /// smaller than the distance this step would cover, preventing overshoot.
    pub fn advance(&mut self, elapsed_seconds: f64) {
        let remaining = self.position.distance(&self.destination);
        if remaining < 1e-9 {
            return;
        }
        let step_nm = self.speed_kn / SECONDS_PER_HOUR * elapsed_seconds;
        if remaining < step_nm {
            self.position = self.destination;
        } else {
            self.position = self.position + self.direction * step_nm;
        }
    }

    /// Position after `seconds_ahead` at constant heading and speed
    ///
    /// Pure: never mutates the vessel. Basis for all predictive checks.
    pub fn predict_position(&self, seconds_ahead: f64) -> Vec2 {
        let step_nm = self.speed_kn / SECONDS_PER_HOUR * seconds_ahead;
        self.position + self.direction * step_nm
    }

    pub fn reached_destination(&self) -> bool {
        self.position.distance(&self.destination) <= ARRIVAL_TOLERANCE_NM
    }

    /// Heading in [0, 360) pointing from current position to destination
    pub fn bearing_to_destination(&self) -> f64 {
        direction_to_heading((self.destination - self.position).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eastbound(speed: f64) -> Vessel {
        Vessel::new(VesselId(0), Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), speed)
    }

    #[test]
    fn test_new_vessel_heads_toward_destination() {
        let v = eastbound(20.0);
        assert!((v.heading() - 0.0).abs() < 1e-9);
        assert!((v.direction().x - 1.0).abs() < 1e-9);
        assert_eq!(v.speed(), 20.0);
        assert_eq!(v.status(), Status::Green);
    }

    #[test]
    fn test_degenerate_vessel_has_zero_direction() {
        let v = Vessel::new(VesselId(0), Vec2::new(2.0, 2.0), Vec2::new(2.0, 2.0), 10.0);
        assert_eq!(v.direction(), Vec2::default());
        assert_eq!(v.heading(), 0.0);
        assert!(v.reached_destination());
    }

    #[test]
    fn test_advance_moves_at_knots() {
        let mut v = eastbound(20.0);
        // 20 kn for 1800 s = 10 NM/h * 0.5 h... 20 kn * 0.5 h = 10 NM; use 360 s = 2 NM
        v.advance(360.0);
        assert!((v.position.x - 2.0).abs() < 1e-9);
        assert!((v.position.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_advance_snaps_onto_destination() {
        let mut v = Vessel::new(VesselId(0), Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0), 20.0);
        // Step distance (2 NM) exceeds remaining 0.5 NM
        v.advance(360.0);
        assert_eq!(v.position, Vec2::new(0.5, 0.0));
        assert!(v.reached_destination());
    }

    #[test]
    fn test_predict_position_is_pure() {
        let v = eastbound(20.0);
        let before = v.position;
        let predicted = v.predict_position(360.0);
        assert!((predicted.x - 2.0).abs() < 1e-9);
        assert_eq!(v.position, before);
    }

    #[test]
    fn test_helm_positive_turns_starboard() {
        let mut v = eastbound(20.0);
        // Eastbound in the atan2 frame: starboard is toward -y
        v.apply_helm(90.0);
        assert!((v.heading() - 270.0).abs() < 1e-9);
        assert!(v.direction().y < -0.999);
    }

    #[test]
    fn test_heading_normalized_after_helm() {
        let mut v = eastbound(20.0);
        v.apply_helm(-725.0);
        assert!(v.heading() >= 0.0 && v.heading() < 360.0);
    }

    #[test]
    fn test_throttle_clamped_to_bounds() {
        let mut v = eastbound(20.0);
        v.apply_throttle(50.0);
        assert_eq!(v.speed(), 20.0);
        v.apply_throttle(-100.0);
        assert_eq!(v.speed(), 0.0);
    }

    #[test]
    fn test_status_setter_maintains_danger_flag() {
        let mut v = eastbound(20.0);
        v.set_status(Status::Orange);
        assert!(v.in_danger());
        v.set_status(Status::Red);
        assert!(v.in_danger());
        v.set_status(Status::Green);
        assert!(!v.in_danger());
    }

    #[test]
    fn test_green_clears_encounter_annotations() {
        let mut v = eastbound(20.0);
        v.set_status(Status::Orange);
        v.set_encounter(EncounterKind::HeadOn, Role::GiveWay);
        v.set_status(Status::Green);
        assert!(v.scenario().is_none());
        assert!(v.role().is_none());
    }

    #[test]
    fn test_bearing_to_destination() {
        let mut v = eastbound(20.0);
        v.apply_helm(45.0);
        // Destination is still due east of the origin
        assert!((v.bearing_to_destination() - 0.0).abs() < 1e-9);
    }
}
