//! COLREGS encounter classification
//!
//! Classifies a vessel pair as head-on, crossing, or overtaking from the
//! relative bearing of one vessel seen from the other, using the literal
//! COLREGS sector bands (±5° head-on cone, 112.5° beam limit). Bearings here
//! are starboard-positive: 0° dead ahead, +90° abeam to starboard, folded
//! into (-180°, 180°].
//!
//! `classify` is a pure function of the two vessels' headings, positions, and
//! speeds; calling it twice with the same inputs yields the same answer.

use crate::core::types::{normalize_signed, EncounterKind};
use crate::world::vessel::Vessel;

/// Half-width of the dead-ahead cone for head-on detection, degrees
const HEAD_ON_BEARING_DEG: f64 = 5.0;

/// Heading difference above which two courses count as reciprocal, degrees
const HEAD_ON_COURSE_DIFF_DEG: f64 = 150.0;

/// Bearing magnitude beyond which a contact is abaft the beam, degrees
const ABAFT_BEAM_DEG: f64 = 112.5;

/// Maximum heading difference for an overtaking run, degrees
const OVERTAKING_COURSE_DIFF_DEG: f64 = 20.0;

/// Bearing of `to` as seen from `from`, starboard-positive, in (-180, 180]
///
/// Positive values put the contact on the starboard side. Headings are stored
/// counterclockwise-positive, so the starboard-positive bearing is the
/// heading minus the absolute bearing of the contact.
pub fn relative_bearing_deg(from: &Vessel, to: &Vessel) -> f64 {
    let offset = to.position - from.position;
    if offset.length() < 1e-9 {
        return 0.0;
    }
    let absolute_deg = offset.y.atan2(offset.x).to_degrees();
    normalize_signed(from.heading() - absolute_deg)
}

/// Absolute heading difference folded into [0, 180]
pub fn heading_difference_deg(a: &Vessel, b: &Vessel) -> f64 {
    normalize_signed(a.heading() - b.heading()).abs()
}

/// Classify the encounter between two vessels
///
/// Sector logic, from A's point of view with B at bearing `q`:
/// - |q| <= 5° and near-reciprocal courses: head-on;
/// - |q| <= 5° with aligned courses and A faster: A is overtaking B;
/// - |q| > 112.5° with aligned courses and B faster: B is overtaking A
///   (the speed test makes overtaking asymmetric - only the faster trailing
///   vessel is the overtaker);
/// - anything else inside the beam sectors: crossing;
/// - both vessels motionless: unknown (defensive default; motionless pairs
///   carry no steerage obligation).
pub fn classify(a: &Vessel, b: &Vessel) -> EncounterKind {
    if a.direction().length() < 1e-9 && b.direction().length() < 1e-9 {
        return EncounterKind::Unknown;
    }

    let bearing = relative_bearing_deg(a, b);
    let course_diff = heading_difference_deg(a, b);

    if bearing.abs() <= HEAD_ON_BEARING_DEG {
        if course_diff > HEAD_ON_COURSE_DIFF_DEG {
            return EncounterKind::HeadOn;
        }
        // B dead ahead on an aligned course: A overtakes only if faster
        if course_diff < OVERTAKING_COURSE_DIFF_DEG && a.speed() > b.speed() {
            return EncounterKind::Overtaking;
        }
        return EncounterKind::Crossing;
    }

    if bearing.abs() > ABAFT_BEAM_DEG {
        // B approaches from abaft A's beam: B overtakes only if faster
        if course_diff < OVERTAKING_COURSE_DIFF_DEG && b.speed() > a.speed() {
            return EncounterKind::Overtaking;
        }
        return EncounterKind::Crossing;
    }

    EncounterKind::Crossing
}
