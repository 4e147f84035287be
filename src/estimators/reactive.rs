use crate::numeric::Scalar;

/// Constant-step gradient tracker, an exponential moving average:
///
/// ```text
/// theta' = theta - eta * (theta - sample)
/// ```
///
/// The rate is lifted into the scalar domain once, at construction; the
/// transition itself reads nothing but its arguments.
#[derive(Debug, Clone, Copy)]
pub struct ReactiveRule<S> {
    eta: S,
}

impl<S: Scalar> ReactiveRule<S> {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            eta: S::from_f64(learning_rate),
        }
    }

    #[inline]
    pub fn apply(&self, theta: S, sample: S) -> S {
        let grad = theta - sample;
        theta - self.eta * grad
    }

    pub fn eta(&self) -> S {
        self.eta
    }
}
