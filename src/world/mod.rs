pub mod action;
pub mod state;
pub mod vessel;

pub use action::Action;
pub use state::WorldState;
pub use vessel::Vessel;
