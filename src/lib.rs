pub mod config;
pub mod estimators;
pub mod metrics;
pub mod noise;
pub mod numeric;
pub mod simulation;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
