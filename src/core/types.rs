//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for vessels in a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VesselId(pub u32);

impl VesselId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for VesselId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vessel-{}", self.0)
    }
}

/// Simulation time-step counter (discrete simulation time unit)
pub type Tick = u64;

/// Meters per nautical mile
pub const METERS_PER_NM: f64 = 1852.0;

/// Seconds per hour (knots -> NM/s conversion)
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// 2D position/vector in nautical-mile coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector, or the zero vector for near-zero inputs
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 1e-9 {
            Self { x: self.x / len, y: self.y / len }
        } else {
            Self::default()
        }
    }

}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Proximity status of a vessel, most severe across all its pairs
///
/// Red: currently inside collision distance of another vessel.
/// Orange: clear now, but a sampled future step violates the threshold.
/// Green: neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Status {
    Green = 0,
    Orange = 1,
    Red = 2,
}

impl Status {
    /// True when the vessel is Orange or Red
    pub fn is_at_risk(&self) -> bool {
        !matches!(self, Status::Green)
    }

    /// The more severe of two statuses (Red > Orange > Green)
    pub fn max(self, other: Self) -> Self {
        if (self as u8) >= (other as u8) {
            self
        } else {
            other
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Green
    }
}

/// COLREGS encounter classification for a vessel pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterKind {
    HeadOn,
    Crossing,
    Overtaking,
    /// Defensive fallback for degenerate geometry (e.g. both vessels motionless)
    Unknown,
}

/// COLREGS obligation assigned to a vessel within an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    GiveWay,
    StandOn,
    Unknown,
}

/// Normalize a heading in degrees to [0, 360)
pub fn normalize_heading(deg: f64) -> f64 {
    let h = deg % 360.0;
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}

/// Fold an angle in degrees into (-180, 180]
pub fn normalize_signed(deg: f64) -> f64 {
    let mut a = deg % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Unit direction vector for a heading (degrees, atan2 convention)
pub fn heading_to_direction(heading_deg: f64) -> Vec2 {
    let rad = heading_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Heading in [0, 360) for a direction vector, or 0 for the zero vector
pub fn direction_to_heading(dir: Vec2) -> f64 {
    if dir.length() < 1e-9 {
        return 0.0;
    }
    normalize_heading(dir.y.atan2(dir.x).to_degrees())
}
