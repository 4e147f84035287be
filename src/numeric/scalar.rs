use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

use crate::numeric::Q16;

/// Arithmetic domain shared by the two numeric modes.
///
/// Estimator transitions are written once against this trait. `f64`
/// implements it directly; [`Q16`] implements it with integer-only
/// operations, so a fixed-mode run never touches a floating intermediate
/// after the initial parameter conversion.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    fn zero() -> Self;

    fn one() -> Self;

    /// Lifts a real-valued parameter into this domain.
    fn from_f64(x: f64) -> Self;

    fn to_f64(self) -> f64;

    fn max(self, other: Self) -> Self;
}

impl Scalar for f64 {
    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn from_f64(x: f64) -> Self {
        x
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        f64::max(self, other)
    }
}

impl Scalar for Q16 {
    #[inline]
    fn zero() -> Self {
        Q16::ZERO
    }

    #[inline]
    fn one() -> Self {
        Q16::ONE
    }

    #[inline]
    fn from_f64(x: f64) -> Self {
        Q16::from_f64(x)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        Q16::to_f64(self)
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        Ord::max(self, other)
    }
}
