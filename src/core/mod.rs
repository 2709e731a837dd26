pub mod config;
pub mod error;
pub mod types;

pub use config::SimulationConfig;
pub use types::{EncounterKind, Role, Status, Tick, Vec2, VesselId};
