use serde::{Deserialize, Serialize};
use tas_core::models::Assignment;
use tas_solver::io::{Problem, ValidationError};

/// The evaluation of an externally produced assignment
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Whether the assignment fits the problem's matrix
    pub valid: bool,
    /// The sum of the matched costs (absent for invalid assignments)
    pub total_cost: Option<f64>,
    /// How many agents received a task
    pub assigned: usize,
}

impl Score {
    pub fn evaluate(problem: &Problem, assignment: Assignment) -> Result<Self, ValidationError> {
        let (costs, _, _) = problem.prepare()?;
        let valid = assignment.is_valid_for(&costs);

        Ok(Self {
            valid,
            total_cost: valid.then(|| assignment.total_cost(&costs)),
            assigned: assignment.assigned_count(),
        })
    }
}
