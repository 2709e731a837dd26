//! Give-way / stand-on role assignment
//!
//! Maps a classified encounter onto COLREGS obligations:
//! - head-on: both vessels give way (both alter to starboard);
//! - overtaking: the faster, trailing vessel gives way;
//! - crossing: the vessel with the other on its starboard side gives way;
//! - unknown geometry carries no derivable obligation.

use crate::colregs::classifier::relative_bearing_deg;
use crate::core::types::{EncounterKind, Role};
use crate::world::vessel::Vessel;

/// Roles for (a, b) given their classified encounter
pub fn assign_roles(a: &Vessel, b: &Vessel, kind: EncounterKind) -> (Role, Role) {
    match kind {
        EncounterKind::HeadOn => (Role::GiveWay, Role::GiveWay),
        EncounterKind::Overtaking => {
            if a.speed() > b.speed() {
                (Role::GiveWay, Role::StandOn)
            } else {
                (Role::StandOn, Role::GiveWay)
            }
        }
        EncounterKind::Crossing => {
            // Starboard-positive bearing in [0, 180) means B is on A's
            // starboard side, so A is obligated to keep clear.
            let bearing = relative_bearing_deg(a, b);
            if bearing >= 0.0 && bearing < 180.0 {
                (Role::GiveWay, Role::StandOn)
            } else {
                (Role::StandOn, Role::GiveWay)
            }
        }
        EncounterKind::Unknown => (Role::Unknown, Role::Unknown),
    }
}
