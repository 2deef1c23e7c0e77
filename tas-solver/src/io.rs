use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tas_core::{
    models::{
        Assignment, CostMatrix, CostMatrixError, Direction, EpsilonPrecision,
        EpsilonPrecisionError,
    },
    ports::Solver,
};
use tracing::{Level, event, span};

/// An assignment problem as it arrives over the wire.
///
/// Nothing is checked during deserialization; [`Problem::prepare`] is the single
/// place where a request is turned into validated solver inputs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Problem {
    /// The cost matrix, one inner list per agent
    pub costs: Vec<Vec<f64>>,
    /// Maximize the total rather than minimize it
    #[serde(default)]
    pub maximize: bool,
    /// The precision dial of the scaled auction (ignored by the other solvers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon_precision: Option<f64>,
}

impl Problem {
    /// Validate the request into the arguments of [`Solver::solve`]
    pub fn prepare(
        &self,
    ) -> Result<(CostMatrix, Direction, Option<EpsilonPrecision>), ValidationError> {
        let costs = CostMatrix::from_rows(self.costs.clone())?;
        let precision = self
            .epsilon_precision
            .map(EpsilonPrecision::new)
            .transpose()?;
        Ok((costs, Direction::from_maximize(self.maximize), precision))
    }
}

/// Errors that can occur while validating a [`Problem`]
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The cost matrix was malformed
    #[error("invalid cost matrix: {0}")]
    Costs(#[from] CostMatrixError),
    /// The precision dial was malformed
    #[error("invalid epsilon precision: {0}")]
    Precision(#[from] EpsilonPrecisionError),
}

/// Errors from [`run`]
#[derive(Debug, thiserror::Error)]
pub enum RunError<E> {
    /// The problem was rejected before reaching the solver
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The solver itself failed
    #[error("solver failed: {0}")]
    Solve(E),
}

/// The outcome of one instrumented solve
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// The label of the solver that produced this report
    pub solver: String,
    /// Wall-clock time spent inside the solver
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
    /// The task of each agent (`-1` when unassigned)
    pub assignment: Assignment,
    /// The sum of the costs of every matched pair
    pub total_cost: f64,
    /// How many agents received a task
    pub assigned: usize,
}

/// Validate `problem`, solve it with `solver`, and report the result.
///
/// Only the call to [`Solver::solve`] is timed; validation and the total cost
/// computation are excluded.
pub fn run<S: Solver>(
    label: &str,
    solver: &S,
    problem: &Problem,
) -> Result<Report, RunError<S::Error>> {
    let (costs, direction, precision) = problem.prepare()?;

    let span = span!(Level::INFO, "run", solver = label, rows = costs.rows(), cols = costs.cols());
    let _guard = span.enter();

    let start = Instant::now();
    let assignment = solver
        .solve(&costs, direction, precision)
        .map_err(RunError::Solve)?;
    let elapsed = start.elapsed();

    let total_cost = assignment.total_cost(&costs);
    let assigned = assignment.assigned_count();
    event!(Level::INFO, ?elapsed, total_cost, assigned, "solved");

    Ok(Report {
        solver: label.to_owned(),
        elapsed,
        assignment,
        total_cost,
        assigned,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hungarian::HungarianSolver;

    fn problem(json: &str) -> Problem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults() {
        let problem = problem(r#"{ "costs": [[1, 2], [3, 4]] }"#);
        let (costs, direction, precision) = problem.prepare().unwrap();
        assert_eq!(costs.rows(), 2);
        assert_eq!(direction, Direction::Minimize);
        assert_eq!(precision, None);
    }

    #[test]
    fn test_validation_errors() {
        let ragged = problem(r#"{ "costs": [[1, 2], [3]] }"#);
        assert!(matches!(
            ragged.prepare().unwrap_err(),
            ValidationError::Costs(CostMatrixError::Ragged { row: 1, .. })
        ));

        let empty = problem(r#"{ "costs": [] }"#);
        assert_eq!(
            empty.prepare().unwrap_err(),
            ValidationError::Costs(CostMatrixError::Empty)
        );

        let precision = problem(r#"{ "costs": [[1]], "epsilon_precision": 1.5 }"#);
        assert_eq!(
            precision.prepare().unwrap_err(),
            ValidationError::Precision(EpsilonPrecisionError::OutOfRange(1.5))
        );
    }

    #[test]
    fn test_run_reports_total_cost() {
        let problem = problem(r#"{ "costs": [[2, 8], [4, 6], [5, 1]], "maximize": true }"#);
        let report = run("hungarian", &HungarianSolver::default(), &problem).unwrap();

        assert_eq!(report.solver, "hungarian");
        assert_eq!(report.assignment.to_signed(), vec![1, -1, 0]);
        assert_eq!(report.total_cost, 13.0);
        assert_eq!(report.assigned, 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["assignment"], serde_json::json!([1, -1, 0]));
        assert!(json["elapsed"].is_string());
    }

    #[test]
    fn test_run_rejects_invalid_problem() {
        let problem = problem(r#"{ "costs": [[1, 2], [3]] }"#);
        let error = run("hungarian", &HungarianSolver::default(), &problem).unwrap_err();
        assert!(matches!(error, RunError::Validation(_)));
    }
}
