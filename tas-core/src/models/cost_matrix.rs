/// A dense, rectangular matrix of assignment costs.
///
/// Rows are agents (e.g. drivers), columns are tasks (e.g. riders). The matrix
/// is never required to be square, but it always has at least one row and one
/// column, and every entry is finite.
///
/// Values are stored row-major, so `get(row, col)` is `values[row * cols + col]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CostMatrixDto", into = "CostMatrixDto")
)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl CostMatrix {
    /// Creates a matrix from row-major values, validating shape and contents
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, CostMatrixError> {
        if rows == 0 || cols == 0 {
            return Err(CostMatrixError::Empty);
        }

        // a shape too large to address saturates to usize::MAX
        let expected = rows.checked_mul(cols);
        if expected != Some(values.len()) {
            return Err(CostMatrixError::LengthMismatch {
                expected: expected.unwrap_or(usize::MAX),
                got: values.len(),
            });
        }

        for (idx, value) in values.iter().enumerate() {
            if value.is_nan() {
                return Err(CostMatrixError::NaN {
                    row: idx / cols,
                    col: idx % cols,
                });
            }
            if value.is_infinite() {
                return Err(CostMatrixError::Infinity {
                    row: idx / cols,
                    col: idx % cols,
                });
            }
        }

        Ok(Self { rows, cols, values })
    }

    /// Creates a matrix from a list of rows, which must all have the same length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CostMatrixError> {
        Self::try_from(CostMatrixDto(rows))
    }

    /// The number of agents
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of tasks
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether there are as many agents as tasks
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The cost of assigning `row` to `col`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.values[row * self.cols + col]
    }

    /// The costs of a single agent against every task
    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterates over the rows of the matrix
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.cols)
    }

    /// The raw row-major values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The smallest entry in the matrix
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// The largest entry in the matrix
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug)]
pub struct CostMatrixDto(pub Vec<Vec<f64>>);

impl From<CostMatrix> for CostMatrixDto {
    fn from(value: CostMatrix) -> Self {
        Self(value.iter_rows().map(<[f64]>::to_vec).collect())
    }
}

impl TryFrom<CostMatrixDto> for CostMatrix {
    type Error = CostMatrixError;

    /// Flattens the nested rows, rejecting ragged input before the value checks
    fn try_from(value: CostMatrixDto) -> Result<Self, Self::Error> {
        let rows = value.0.len();
        let cols = value.0.first().map(Vec::len).unwrap_or_default();

        let mut values = Vec::with_capacity(rows * cols);
        for (row, data) in value.0.into_iter().enumerate() {
            if data.len() != cols {
                return Err(CostMatrixError::Ragged {
                    row,
                    expected: cols,
                    got: data.len(),
                });
            }
            values.extend(data);
        }

        Self::new(rows, cols, values)
    }
}

impl TryFrom<Vec<Vec<f64>>> for CostMatrix {
    type Error = CostMatrixError;

    fn try_from(value: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::try_from(CostMatrixDto(value))
    }
}

/// Errors that can occur when creating or validating a CostMatrix
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CostMatrixError {
    /// Error when the matrix has no rows or no columns
    #[error("cost matrix must have at least one row and one column")]
    Empty,
    /// Error when the rows do not all have the same length
    #[error("row {row} has {got} entries, expected {expected}")]
    Ragged {
        /// The offending row
        row: usize,
        /// The length of the first row
        expected: usize,
        /// The length of the offending row
        got: usize,
    },
    /// Error when the flat data does not match the declared shape
    #[error("expected {expected} values, got {got}")]
    LengthMismatch {
        /// rows * cols
        expected: usize,
        /// The number of values provided
        got: usize,
    },
    /// Error when an entry is NaN
    #[error("NaN value encountered at ({row}, {col})")]
    NaN {
        /// Row of the entry
        row: usize,
        /// Column of the entry
        col: usize,
    },
    /// Error when an entry is infinite
    #[error("infinite value encountered at ({row}, {col})")]
    Infinity {
        /// Row of the entry
        row: usize,
        /// Column of the entry
        col: usize,
    },
}
