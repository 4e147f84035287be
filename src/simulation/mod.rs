mod ensemble;
mod instance;
mod runner;

pub use ensemble::Ensemble;
pub use instance::{EstimatorInstance, StepError};
pub use runner::{Simulation, SimulationRunner};
