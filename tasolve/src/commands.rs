use super::IOArgs;
use clap::Subcommand;
use std::time::Duration;

mod score;
pub use score::Score;

mod solve;
pub use solve::SolverKind;

#[derive(Subcommand)]
pub enum Commands {
    /// Solve an assignment problem and report the matching
    Solve {
        #[command(flatten)]
        io: IOArgs,

        /// Request a specific solver (defaults to the configured one)
        #[arg(short, long)]
        solver: Option<SolverKind>,

        /// Override the problem's epsilon precision (scaled auction only)
        #[arg(short, long)]
        precision: Option<f64>,

        /// Abort if the solver has not finished after this long, e.g. "500ms"
        #[arg(short, long, value_parser = humantime_serde::re::humantime::parse_duration)]
        time_limit: Option<Duration>,
    },

    /// Evaluate a given assignment against a problem
    Score {
        #[command(flatten)]
        io: IOArgs,

        /// The task of each agent, comma separated, with -1 for unassigned agents
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        assignment: Vec<i64>,
    },
}
