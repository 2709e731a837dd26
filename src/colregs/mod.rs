pub mod classifier;
pub mod predictor;
pub mod roles;

pub use classifier::{classify, relative_bearing_deg};
pub use predictor::{check_future, check_immediate, sweep, PairAssessment, PairRisk, SweepResult};
pub use roles::assign_roles;
