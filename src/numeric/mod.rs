mod fixed;
mod scalar;

pub use fixed::Q16;
pub use scalar::Scalar;
