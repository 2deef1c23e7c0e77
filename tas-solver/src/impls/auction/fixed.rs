use super::{EpsilonPolicy, EpsilonSchedule};
use crate::square::ValueRange;
use tas_core::models::EpsilonPrecision;

/// A constant epsilon of `1 / (n + 1)`.
///
/// Any epsilon below `1 / n` leaves the auction exactly optimal on integer
/// costs. On real-valued costs the result is within `n / (n + 1)` of optimal.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedEpsilon;

impl EpsilonPolicy for FixedEpsilon {
    type Schedule = FixedSchedule;

    fn schedule(&self, _: ValueRange, n: usize, _: Option<EpsilonPrecision>) -> FixedSchedule {
        FixedSchedule(1.0 / (n as f64 + 1.0))
    }
}

/// The schedule of [`FixedEpsilon`]
#[derive(Clone, Copy, Debug)]
pub struct FixedSchedule(f64);

impl EpsilonSchedule for FixedSchedule {
    fn next_epsilon(&mut self) -> f64 {
        self.0
    }
}
