/// The precision dial of the epsilon-scaling auction, a value in `[0, 1]`.
///
/// `0` anneals as little as possible (fastest, coarsest), `1` keeps shrinking
/// epsilon until it reaches `1 / n` (slowest, most precise). Solvers that do
/// not anneal ignore it.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct EpsilonPrecision(f64);

impl EpsilonPrecision {
    /// The coarsest setting
    pub const MIN: Self = Self(0.0);

    /// The most precise setting
    pub const MAX: Self = Self(1.0);

    /// The dial used when a request does not provide one
    pub const DEFAULT: Self = Self(0.5);

    /// Creates a precision, failing (never clamping) when the value is outside `[0, 1]`
    pub fn new(value: f64) -> Result<Self, EpsilonPrecisionError> {
        if value.is_nan() {
            Err(EpsilonPrecisionError::NaN)
        } else if !(0.0..=1.0).contains(&value) {
            Err(EpsilonPrecisionError::OutOfRange(value))
        } else {
            Ok(Self(value))
        }
    }

    /// The underlying value
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for EpsilonPrecision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for EpsilonPrecision {
    type Error = EpsilonPrecisionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EpsilonPrecision> for f64 {
    fn from(value: EpsilonPrecision) -> Self {
        value.0
    }
}

/// Errors that can occur when creating an EpsilonPrecision
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum EpsilonPrecisionError {
    /// Error when the value is NaN
    #[error("epsilon precision cannot be NaN")]
    NaN,
    /// Error when the value lies outside the unit interval
    #[error("epsilon precision must be between 0 and 1, got {0}")]
    OutOfRange(f64),
}
