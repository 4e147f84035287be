use crate::config::{NumericMode, SimulationConfig};

/// The original five-seed experiment, in the requested numeric mode.
pub fn reference_config(mode: NumericMode) -> SimulationConfig {
    SimulationConfig {
        numeric_mode: mode,
        ..SimulationConfig::default()
    }
}

/// Single-seed setup with the noise turned off: every sample equals the
/// true mean, so trajectories follow the closed-form recursions.
pub fn zero_noise_config(step_count: usize, learning_rate: f64) -> SimulationConfig {
    SimulationConfig {
        seeds: vec![42],
        step_count,
        learning_rate,
        noise_sigma: 0.0,
        ..SimulationConfig::default()
    }
}
