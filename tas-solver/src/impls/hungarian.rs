use crate::square::SquareMatrix;
use std::convert::Infallible;
use tas_core::{
    models::{Assignment, CostMatrix, Direction, EpsilonPrecision},
    ports::Solver,
};
use tracing::{Level, event, span};

mod state;
use state::State;

/// Configuration for [`HungarianSolver`]
#[derive(Clone, Debug)]
pub struct HungarianSettings {
    zero_tolerance: f64,
}

impl HungarianSettings {
    /// The tolerance used by [`HungarianSettings::default`]
    pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-9;

    /// Treat reduced costs with an absolute value below `zero_tolerance` as zero.
    ///
    /// The tolerance must be finite and positive; otherwise no reduced cost
    /// ever counts as zero and the main cycle cannot make progress.
    pub fn new(zero_tolerance: f64) -> Result<Self, HungarianSettingsError> {
        if zero_tolerance.is_finite() && zero_tolerance > 0.0 {
            Ok(Self { zero_tolerance })
        } else {
            Err(HungarianSettingsError::InvalidTolerance(zero_tolerance))
        }
    }

    /// The zero tolerance
    pub fn zero_tolerance(&self) -> f64 {
        self.zero_tolerance
    }
}

impl Default for HungarianSettings {
    fn default() -> Self {
        Self {
            zero_tolerance: Self::DEFAULT_ZERO_TOLERANCE,
        }
    }
}

/// Errors when configuring a [`HungarianSolver`]
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum HungarianSettingsError {
    /// Error when the zero tolerance is not a finite positive number
    #[error("zero tolerance must be a finite number greater than 0, got {0}")]
    InvalidTolerance(f64),
}

/// An exact solver based on the primal-dual (Kuhn-Munkres) method.
///
/// The matrix is padded to square with its largest value, a maximization is
/// converted into a minimization by subtracting every row from its maximum, and
/// the rows and columns are reduced. The main cycle then alternates between
/// covering starred columns, priming uncovered zeros, flipping augmenting paths,
/// and shifting the smallest uncovered value, until one star sits in every row
/// and column. Those stars form an optimal matching.
///
/// Runs in O(n³) time on the padded size `n`. Zeros are searched for in row-major
/// order, so among several optimal matchings the same one is always returned.
#[derive(Clone, Debug, Default)]
pub struct HungarianSolver(HungarianSettings);

impl Solver for HungarianSolver {
    type Settings = HungarianSettings;
    type Error = Infallible;

    fn new(settings: Self::Settings) -> Self {
        Self(settings)
    }

    fn solve(
        &self,
        costs: &CostMatrix,
        direction: Direction,
        _precision: Option<EpsilonPrecision>,
    ) -> Result<Assignment, Self::Error> {
        // The padding only needs to be a constant: every complete matching on
        // the square matrix uses the same number of virtual cells.
        let square = SquareMatrix::pad(costs, |range| range.max);
        let n = square.size();
        let (orientation, min_dimension) = (square.orientation(), square.min_dimension());

        let span = span!(Level::DEBUG, "hungarian", n, ?direction);
        let _guard = span.enter();

        let mut state = State::new(square.into_values(), n, self.0.zero_tolerance);
        if direction.is_maximize() {
            state.invert_rows();
        }
        state.reduce_rows();
        state.reduce_columns();
        state.star_initial_zeros();

        let stats = state.run();
        event!(
            Level::DEBUG,
            augmentations = stats.augmentations,
            adjustments = stats.adjustments,
            "matching complete"
        );

        Ok(crate::square::trim(
            state.into_assignment(),
            orientation,
            min_dimension,
        ))
    }
}
