use crate::models::{Assignment, CostMatrix, Direction, EpsilonPrecision};

/// Interface for engines that solve the rectangular assignment problem.
///
/// A solver takes a cost matrix between agents (rows) and tasks (columns) and
/// produces a one-to-one mapping from agents to tasks that optimizes the total
/// cost in the requested direction.
///
/// Implementations hold configuration only. All scratch state of a solve
/// (masks, covers, prices, owners, epsilon schedules) is allocated inside each
/// call to [`Solver::solve`], so a single instance may serve any number of
/// independent requests, sequentially or concurrently.
pub trait Solver {
    /// The configuration type for this solver
    type Settings;

    /// Error type for solver failures
    type Error: std::error::Error;

    /// Create a new instance with the provided settings
    fn new(settings: Self::Settings) -> Self;

    /// Solve the assignment problem for the given costs
    ///
    /// # Arguments
    ///
    /// - `costs`: the (possibly rectangular) cost matrix, agents by tasks
    /// - `direction`: whether to minimize or maximize the total cost
    /// - `precision`: the epsilon-scaling dial, ignored by solvers that do not anneal
    ///
    /// # Returns
    ///
    /// An [`Assignment`] with one entry per row of `costs`. Every assigned task
    /// is a valid column and no task is used twice. When `costs` is square,
    /// every agent is assigned.
    fn solve(
        &self,
        costs: &CostMatrix,
        direction: Direction,
        precision: Option<EpsilonPrecision>,
    ) -> Result<Assignment, Self::Error>;
}
