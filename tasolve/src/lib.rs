use clap::Parser;
use std::{path::PathBuf, time::Duration};
use tas_core::models::Assignment;

mod io;
pub use io::*;

mod commands;
pub use commands::*;

mod config;
pub use config::*;

// The top-level arguments: an optional config file and the subcommand to execute
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct BaseArgs {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "TAS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl BaseArgs {
    pub async fn evaluate(self) -> anyhow::Result<()> {
        let config = AppConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Solve {
                io,
                solver,
                precision,
                time_limit,
            } => {
                let mut problem = io.read_problem()?;
                if precision.is_some() {
                    problem.epsilon_precision = precision;
                }

                let kind = solver.unwrap_or(config.solver.kind);
                let time_limit = time_limit.or(config.run.time_limit);
                let report = kind.solve_within(config.solver, problem, time_limit).await?;

                serde_json::to_writer_pretty(io.write()?, &report)?;
            }
            Commands::Score { io, assignment } => {
                let problem = io.read_problem()?;
                let score = Score::evaluate(&problem, Assignment::try_from(assignment)?)?;
                serde_json::to_writer_pretty(io.write()?, &score)?;
            }
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("solver did not finish within {}", humantime_serde::re::humantime::format_duration(*.0))]
    TimeLimit(Duration),
    #[error("solver thread exited without reporting")]
    Abandoned,
}
