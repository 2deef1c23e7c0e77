use crate::square::{SquareMatrix, ValueRange};
use tas_core::{
    models::{Assignment, CostMatrix, Direction, EpsilonPrecision},
    ports::Solver,
};
use tracing::{Level, event, span};

mod fixed;
pub use fixed::{FixedEpsilon, FixedSchedule};

mod scaled;
pub use scaled::{ScaledEpsilon, ScaledEpsilonError, ScaledSchedule};

/// An auction with a constant epsilon of `1 / (n + 1)`
pub type FixedEpsilonSolver = AuctionSolver<FixedEpsilon>;

/// An auction that anneals epsilon from `(max - min) / n` downwards
pub type ScaledEpsilonSolver = AuctionSolver<ScaledEpsilon>;

/// Chooses the value of the virtual cells added when padding to square.
pub trait FillPolicy {
    /// The fill value, given the range of the original values
    fn fill(&self, range: ValueRange, direction: Direction) -> f64;
}

/// Pads with the least attractive original value: the minimum when
/// maximizing, the maximum when minimizing.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeastAttractive;

impl FillPolicy for LeastAttractive {
    fn fill(&self, range: ValueRange, direction: Direction) -> f64 {
        match direction {
            Direction::Maximize => range.min,
            Direction::Minimize => range.max,
        }
    }
}

/// Produces a fresh [`EpsilonSchedule`] for every solve.
///
/// Policies are plain configuration; anything a schedule memoizes lives in the
/// schedule, which is dropped at the end of the solve that created it.
pub trait EpsilonPolicy {
    /// The per-solve schedule type
    type Schedule: EpsilonSchedule;

    /// Start a schedule for an `n × n` auction whose original values span `range`
    fn schedule(
        &self,
        range: ValueRange,
        n: usize,
        precision: Option<EpsilonPrecision>,
    ) -> Self::Schedule;
}

/// The epsilon for each bidding pass of one solve
pub trait EpsilonSchedule {
    /// Called once at the start of every pass; must return a positive value
    fn next_epsilon(&mut self) -> f64;
}

/// Configuration for [`AuctionSolver`]
#[derive(Clone, Debug, Default)]
pub struct AuctionSettings<E> {
    /// The epsilon policy
    pub epsilon: E,
    /// Give up after this many bidding passes (`None` runs until every agent is assigned)
    pub max_passes: Option<usize>,
}

/// Errors reported by the auction solvers
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SolveError {
    /// Error when the pass limit was reached with agents still unassigned
    #[error("auction did not converge within {passes} passes")]
    NotConverged {
        /// The number of completed passes
        passes: usize,
    },
}

/// A forward auction for the assignment problem.
///
/// Agents bid for tasks against a price vector. In every pass each unassigned
/// agent finds the task of highest value (`±cost - price`, negated when
/// minimizing) and the second highest value, raises the price of its best task
/// by their difference plus epsilon, takes the task, and evicts its previous
/// owner. Passes repeat until every agent on the padded square matrix owns a
/// task. For a fixed `epsilon > 0` this terminates, and the total cost is within
/// `n · epsilon` of the optimum.
///
/// The epsilon schedule and the padding value are pluggable; see
/// [`FixedEpsilonSolver`] and [`ScaledEpsilonSolver`].
#[derive(Clone, Debug, Default)]
pub struct AuctionSolver<E, F = LeastAttractive> {
    epsilon: E,
    fill: F,
    max_passes: Option<usize>,
}

impl<E, F> AuctionSolver<E, F> {
    /// Replace the padding policy
    pub fn with_fill<G: FillPolicy>(self, fill: G) -> AuctionSolver<E, G> {
        AuctionSolver {
            epsilon: self.epsilon,
            fill,
            max_passes: self.max_passes,
        }
    }
}

impl<E: EpsilonPolicy, F: FillPolicy + Default> Solver for AuctionSolver<E, F> {
    type Settings = AuctionSettings<E>;
    type Error = SolveError;

    fn new(settings: Self::Settings) -> Self {
        Self {
            epsilon: settings.epsilon,
            fill: F::default(),
            max_passes: settings.max_passes,
        }
    }

    fn solve(
        &self,
        costs: &CostMatrix,
        direction: Direction,
        precision: Option<EpsilonPrecision>,
    ) -> Result<Assignment, Self::Error> {
        let square = SquareMatrix::pad(costs, |range| self.fill.fill(range, direction));
        let n = square.size();

        let span = span!(Level::DEBUG, "auction", n, ?direction);
        let _guard = span.enter();

        let mut schedule = self.epsilon.schedule(square.range(), n, precision);
        let raw = Bidding::new(&square, direction).run(&mut schedule, self.max_passes)?;

        Ok(square.trim(raw))
    }
}

/// The price vector and ownership maps of a single solve
struct Bidding<'a> {
    square: &'a SquareMatrix,
    sign: f64,
    prices: Vec<f64>,
    task_of_agent: Vec<Option<usize>>,
    agent_of_task: Vec<Option<usize>>,
    unassigned: usize,
}

impl<'a> Bidding<'a> {
    fn new(square: &'a SquareMatrix, direction: Direction) -> Self {
        let n = square.size();
        Self {
            square,
            // we always run a maximization auction internally
            sign: if direction.is_maximize() { 1.0 } else { -1.0 },
            prices: vec![0.0; n],
            task_of_agent: vec![None; n],
            agent_of_task: vec![None; n],
            unassigned: n,
        }
    }

    fn run(
        mut self,
        schedule: &mut impl EpsilonSchedule,
        max_passes: Option<usize>,
    ) -> Result<Vec<usize>, SolveError> {
        let n = self.square.size();
        let mut passes = 0usize;
        let mut bids = 0usize;
        let mut epsilon = 0.0;

        while self.unassigned > 0 {
            if max_passes.is_some_and(|limit| passes >= limit) {
                event!(Level::WARN, passes, unassigned = self.unassigned, "pass limit reached");
                return Err(SolveError::NotConverged { passes });
            }

            epsilon = schedule.next_epsilon();
            passes += 1;
            event!(Level::TRACE, pass = passes, epsilon);

            // An agent evicted by a lower-indexed bidder is revisited later in
            // this same pass; one evicted by a higher-indexed bidder waits for the next.
            for agent in 0..n {
                if self.task_of_agent[agent].is_some() {
                    continue;
                }
                let (task, bid) = self.best_bid(agent, epsilon);
                self.award(agent, task, bid);
                bids += 1;
            }
        }

        event!(Level::DEBUG, passes, bids, epsilon, "auction converged");

        // Every agent owns a task here, so this keeps all n entries in order
        Ok(self.task_of_agent.into_iter().flatten().collect())
    }

    /// The best task for `agent` and the price increment it bids for it
    fn best_bid(&self, agent: usize, epsilon: f64) -> (usize, f64) {
        let mut best_task = 0;
        let mut best_value = f64::NEG_INFINITY;
        let mut second_value = f64::NEG_INFINITY;

        for (task, (&cost, &price)) in self.square.row(agent).iter().zip(&self.prices).enumerate() {
            let value = self.sign * cost - price;
            if value > best_value {
                second_value = best_value;
                best_value = value;
                best_task = task;
            } else if value > second_value {
                second_value = value;
            }
        }

        // A single task has no competitor; the bid is just epsilon
        let bid = if second_value.is_finite() {
            best_value - second_value + epsilon
        } else {
            epsilon
        };

        (best_task, bid)
    }

    fn award(&mut self, agent: usize, task: usize, bid: f64) {
        self.prices[task] += bid;

        if let Some(previous) = self.agent_of_task[task].replace(agent) {
            self.task_of_agent[previous] = None;
            self.unassigned += 1;
        }

        self.task_of_agent[agent] = Some(task);
        self.unassigned -= 1;
    }
}
