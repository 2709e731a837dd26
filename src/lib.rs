//! Searoom - COLREGS Collision-Avoidance Simulation

pub mod avoidance;
pub mod colregs;
pub mod core;
pub mod scenario;
pub mod simulation;
pub mod world;
