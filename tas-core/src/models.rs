mod assignment;
mod cost_matrix;
mod direction;
mod precision;

pub use assignment::{Assignment, AssignmentError};
pub use cost_matrix::{CostMatrix, CostMatrixError};
pub use direction::Direction;
pub use precision::{EpsilonPrecision, EpsilonPrecisionError};
