use crate::numeric::Scalar;

/// State carried by the adaptive path: the estimate and its gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveState<S> {
    pub theta: S,
    pub alpha: S,
}

impl<S: Scalar> AdaptiveState<S> {
    /// `theta = 0`, `alpha = 1`.
    pub fn initial() -> Self {
        Self {
            theta: S::zero(),
            alpha: S::one(),
        }
    }
}

/// Gain-decaying gradient tracker:
///
/// ```text
/// theta' = theta - (eta * alpha) * (theta - sample)
/// alpha' = max(alpha_floor, alpha * gamma)
/// ```
///
/// The gain decays geometrically until it reaches the floor; past that
/// point the path behaves like a reactive tracker with effective rate
/// `eta * alpha_floor`. The gain never increases.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveRule<S> {
    eta: S,
    gamma: S,
    alpha_floor: S,
}

impl<S: Scalar> AdaptiveRule<S> {
    pub fn new(learning_rate: f64, decay: f64, alpha_floor: f64) -> Self {
        Self {
            eta: S::from_f64(learning_rate),
            gamma: S::from_f64(decay),
            alpha_floor: S::from_f64(alpha_floor),
        }
    }

    /// One transition from the pre-update state. Both outputs are read
    /// from `state` before either is written; the gradient is this
    /// path's own, never another estimator's.
    #[inline]
    pub fn apply(&self, state: AdaptiveState<S>, sample: S) -> AdaptiveState<S> {
        let grad = state.theta - sample;
        AdaptiveState {
            // eta * alpha is formed first; fixed-point truncation makes
            // the association order observable.
            theta: state.theta - self.eta * state.alpha * grad,
            alpha: self.alpha_floor.max(state.alpha * self.gamma),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Q16;

    #[test]
    fn initial_state_is_zero_estimate_with_unit_gain() {
        let state = AdaptiveState::<f64>::initial();
        assert_eq!(state.theta, 0.0);
        assert_eq!(state.alpha, 1.0);
    }

    #[test]
    fn outputs_depend_only_on_the_pre_update_state() {
        let rule = AdaptiveRule::<f64>::new(0.2, 0.9, 0.01);
        let state = AdaptiveState {
            theta: 2.0,
            alpha: 0.5,
        };
        let next = rule.apply(state, 1.0);
        // theta' uses alpha = 0.5, not the decayed 0.45.
        assert!((next.theta - 1.9).abs() < 1e-12);
        assert!((next.alpha - 0.45).abs() < 1e-12);
    }

    #[test]
    fn gain_is_monotone_and_stops_at_the_floor() {
        let rule = AdaptiveRule::<f64>::new(0.12, 0.985, 0.005);
        let mut state = AdaptiveState::<f64>::initial();
        let mut previous = state.alpha;
        for _ in 0..2000 {
            state = rule.apply(state, 3.5);
            assert!(state.alpha <= previous);
            assert!(state.alpha >= 0.005);
            previous = state.alpha;
        }
        assert_eq!(state.alpha, 0.005);
    }

    #[test]
    fn fixed_gain_reaches_the_floor_exactly() {
        let rule = AdaptiveRule::<Q16>::new(0.12, 0.985, 0.005);
        let mut state = AdaptiveState::<Q16>::initial();
        for _ in 0..2000 {
            state = rule.apply(state, Q16::from_f64(3.5));
        }
        assert_eq!(state.alpha, Q16::from_f64(0.005));
    }

    #[test]
    fn fixed_transition_matches_the_explicit_composition() {
        let rule = AdaptiveRule::<Q16>::new(0.12, 0.985, 0.005);
        let state = AdaptiveState {
            theta: Q16::from_f64(1.0),
            alpha: Q16::from_f64(0.5),
        };
        let sample = Q16::from_f64(3.5);

        let grad = state.theta - sample;
        let expected_theta = state.theta - Q16::from_f64(0.12) * Q16::from_f64(0.5) * grad;
        let expected_alpha = Ord::max(
            Q16::from_f64(0.005),
            Q16::from_f64(0.5) * Q16::from_f64(0.985),
        );

        let next = rule.apply(state, sample);
        assert_eq!(next.theta, expected_theta);
        assert_eq!(next.alpha, expected_alpha);
    }
}
