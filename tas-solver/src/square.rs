use tas_core::models::{Assignment, CostMatrix};

/// How the caller's matrix compared to the square one it was padded into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// More agents than tasks; padding added virtual tasks (columns)
    Tall,
    /// More tasks than agents; padding added virtual agents (rows)
    Wide,
    /// Already square, nothing was padded
    Square,
}

impl Orientation {
    /// Classify a `rows` by `cols` shape
    pub fn of(rows: usize, cols: usize) -> Self {
        match rows.cmp(&cols) {
            std::cmp::Ordering::Greater => Self::Tall,
            std::cmp::Ordering::Less => Self::Wide,
            std::cmp::Ordering::Equal => Self::Square,
        }
    }
}

/// The smallest and largest of the caller's original values
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    /// The smallest original entry
    pub min: f64,
    /// The largest original entry
    pub max: f64,
}

impl ValueRange {
    /// `max - min`
    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}

/// A square cost matrix derived from a (possibly rectangular) [`CostMatrix`].
///
/// The original cells are copied verbatim into the top-left corner and every
/// other cell holds a single fill value. The range of the original values is
/// captured during the copy, so consumers that need it (the padding policy
/// itself, or an epsilon schedule) never have to scan the input a second time.
#[derive(Clone, Debug)]
pub struct SquareMatrix {
    n: usize,
    values: Vec<f64>,
    orientation: Orientation,
    min_dimension: usize,
    range: ValueRange,
}

impl SquareMatrix {
    /// Copy `costs` into a new `n × n` matrix, `n = max(rows, cols)`.
    ///
    /// `fill` is called once, with the range of the original values, to choose
    /// the value of every padded cell. It is not called when `costs` is already
    /// square; the copy is still independent of the caller's matrix.
    pub fn pad(costs: &CostMatrix, fill: impl FnOnce(ValueRange) -> f64) -> Self {
        let (rows, cols) = (costs.rows(), costs.cols());
        let n = rows.max(cols);

        let mut values = vec![0.0; n * n];
        let mut range = ValueRange {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        };

        for (i, row) in costs.iter_rows().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                values[i * n + j] = value;
                range.min = range.min.min(value);
                range.max = range.max.max(value);
            }
        }

        let orientation = Orientation::of(rows, cols);
        if orientation != Orientation::Square {
            let fill_value = fill(range);
            for i in 0..n {
                for j in 0..n {
                    if i >= rows || j >= cols {
                        values[i * n + j] = fill_value;
                    }
                }
            }
        }

        Self {
            n,
            values,
            orientation,
            min_dimension: rows.min(cols),
            range,
        }
    }

    /// The side length of the matrix
    pub fn size(&self) -> usize {
        self.n
    }

    /// The cost of assigning `row` to `col`
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.n + col]
    }

    /// A single row of the matrix
    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.n..(row + 1) * self.n]
    }

    /// How the original matrix was padded
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// `min(rows, cols)` of the original matrix
    pub fn min_dimension(&self) -> usize {
        self.min_dimension
    }

    /// The range of the original (unpadded) values
    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Consume the matrix, returning its row-major values
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Trim a raw square assignment (one task per row) back to the original shape
    pub fn trim(&self, raw: Vec<usize>) -> Assignment {
        trim(raw, self.orientation, self.min_dimension)
    }
}

/// Map a complete assignment on the padded square matrix back to the original shape.
///
/// - [`Orientation::Tall`]: agents matched to a virtual task (`>= min_dimension`) become unassigned.
/// - [`Orientation::Wide`]: virtual agents are dropped, keeping the first `min_dimension` entries.
/// - [`Orientation::Square`]: every agent keeps its task.
pub fn trim(raw: Vec<usize>, orientation: Orientation, min_dimension: usize) -> Assignment {
    match orientation {
        Orientation::Tall => raw
            .into_iter()
            .map(|task| (task < min_dimension).then_some(task))
            .collect(),
        Orientation::Wide => raw.into_iter().take(min_dimension).map(Some).collect(),
        Orientation::Square => raw.into_iter().map(Some).collect(),
    }
}
