use crate::{CliError, SolverConfig};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tas_core::{models::EpsilonPrecision, ports::Solver};
use tas_solver::{
    auction::{AuctionSettings, FixedEpsilon, FixedEpsilonSolver, ScaledEpsilon, ScaledEpsilonSolver},
    hungarian::{HungarianSettings, HungarianSolver},
    io::{Problem, Report, run},
};
use tracing::{Level, event};

// This explicitly articulates the available solvers, both for the `solve`
// subcommand and for the configuration file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    #[default]
    Hungarian,
    AuctionFixed,
    AuctionScaled,
}

// Conveniently, we can use the same enum to handle the particulars of
// constructing and calling into the various solver implementations
impl SolverKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Hungarian => "hungarian",
            Self::AuctionFixed => "auction-fixed",
            Self::AuctionScaled => "auction-scaled",
        }
    }

    pub fn solve(self, config: &SolverConfig, problem: &Problem) -> anyhow::Result<Report> {
        let label = self.label();
        let report = match self {
            Self::Hungarian => {
                let solver = HungarianSolver::new(HungarianSettings::new(config.zero_tolerance)?);
                run(label, &solver, problem)?
            }
            Self::AuctionFixed => {
                let solver = FixedEpsilonSolver::new(AuctionSettings {
                    epsilon: FixedEpsilon,
                    max_passes: config.max_passes,
                });
                run(label, &solver, problem)?
            }
            Self::AuctionScaled => {
                let epsilon = ScaledEpsilon::new(config.epsilon_step)?
                    .with_default_precision(EpsilonPrecision::new(config.default_precision)?);
                let solver = ScaledEpsilonSolver::new(AuctionSettings {
                    epsilon,
                    max_passes: config.max_passes,
                });
                run(label, &solver, problem)?
            }
        };
        Ok(report)
    }

    /// Solve on a dedicated thread, giving up after `time_limit` if one is set.
    ///
    /// An abandoned solve keeps its thread until it finishes on its own or the
    /// process exits.
    pub async fn solve_within(
        self,
        config: SolverConfig,
        problem: Problem,
        time_limit: Option<Duration>,
    ) -> anyhow::Result<Report> {
        let (tx, rx) = tokio::sync::oneshot::channel();
        std::thread::spawn(move || {
            // the receiver is gone only if we already timed out
            let _ = tx.send(self.solve(&config, &problem));
        });

        let outcome = match time_limit {
            Some(limit) => match tokio::time::timeout(limit, rx).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    event!(Level::WARN, solver = self.label(), ?limit, "time limit exceeded");
                    return Err(CliError::TimeLimit(limit).into());
                }
            },
            None => rx.await,
        };

        outcome.map_err(|_| CliError::Abandoned)?
    }
}
