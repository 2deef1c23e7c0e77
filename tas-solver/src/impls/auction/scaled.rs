use super::{EpsilonPolicy, EpsilonSchedule};
use crate::square::ValueRange;
use tas_core::models::EpsilonPrecision;

/// Errors when configuring a [`ScaledEpsilon`]
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ScaledEpsilonError {
    /// Error when the reduction step cannot shrink epsilon
    #[error("reduction step must be a finite number greater than 1, got {0}")]
    InvalidStep(f64),
}

/// Epsilon scaling: start coarse and refine.
///
/// The first pass uses `(max - min) / n`. Before each later pass epsilon is
/// divided by the reduction step, unless it has already reached the floor
/// `(1 - p) · (max - min) / n + p / n`, where `p` is the precision dial. A
/// precision of `1` anneals all the way down to `1 / n`; a precision of `0`
/// never leaves the starting value.
///
/// When every original value is equal the starting value would be zero, which
/// stalls the auction, so `1 / n` is used instead (and epsilon never shrinks).
#[derive(Clone, Copy, Debug)]
pub struct ScaledEpsilon {
    step: f64,
    default_precision: EpsilonPrecision,
}

impl ScaledEpsilon {
    /// The reduction step used by [`ScaledEpsilon::default`]
    pub const DEFAULT_STEP: f64 = 5.0;

    /// Create a policy that divides epsilon by `step` between passes
    pub fn new(step: f64) -> Result<Self, ScaledEpsilonError> {
        if step.is_finite() && step > 1.0 {
            Ok(Self {
                step,
                default_precision: EpsilonPrecision::default(),
            })
        } else {
            Err(ScaledEpsilonError::InvalidStep(step))
        }
    }

    /// Use `precision` for solves that do not supply one
    pub fn with_default_precision(self, precision: EpsilonPrecision) -> Self {
        Self {
            default_precision: precision,
            ..self
        }
    }

    /// The reduction step
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The precision used when a solve does not supply one
    pub fn default_precision(&self) -> EpsilonPrecision {
        self.default_precision
    }
}

impl Default for ScaledEpsilon {
    fn default() -> Self {
        Self {
            step: Self::DEFAULT_STEP,
            default_precision: EpsilonPrecision::default(),
        }
    }
}

impl EpsilonPolicy for ScaledEpsilon {
    type Schedule = ScaledSchedule;

    fn schedule(
        &self,
        range: ValueRange,
        n: usize,
        precision: Option<EpsilonPrecision>,
    ) -> ScaledSchedule {
        let n = n as f64;
        let p = precision.unwrap_or(self.default_precision).value();
        let fine = 1.0 / n;
        let coarse = match range.spread() / n {
            coarse if coarse > 0.0 => coarse,
            _ => fine,
        };

        ScaledSchedule {
            initial: coarse,
            // (1 - p) · coarse + p · fine, written to stay monotone in p under rounding
            floor: coarse + p * (fine - coarse),
            step: self.step,
            current: None,
        }
    }
}

/// The schedule of [`ScaledEpsilon`] for one solve
#[derive(Clone, Copy, Debug)]
pub struct ScaledSchedule {
    initial: f64,
    floor: f64,
    step: f64,
    current: Option<f64>,
}

impl EpsilonSchedule for ScaledSchedule {
    fn next_epsilon(&mut self) -> f64 {
        let epsilon = match self.current {
            None => self.initial,
            Some(epsilon) if epsilon > self.floor => epsilon / self.step,
            Some(epsilon) => epsilon,
        };
        self.current = Some(epsilon);
        epsilon
    }
}
