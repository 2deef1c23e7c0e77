//! Application configuration management.
//!
//! Configuration is layered from default values, an optional TOML file, and
//! environment variables, in increasing order of precedence.

use crate::SolverKind;
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use tas_core::models::EpsilonPrecision;
use tas_solver::{auction::ScaledEpsilon, hungarian::HungarianSettings};

/// The main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Which solver to use and how to tune it
    #[serde(default)]
    pub solver: SolverConfig,

    /// Limits applied around a solve
    #[serde(default)]
    pub run: RunConfig,
}

/// Solver selection and tunables
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverConfig {
    /// The solver used when none is requested on the command line
    pub kind: SolverKind,
    /// Reduced costs below this are zero (exact solver)
    pub zero_tolerance: f64,
    /// Abort an auction after this many bidding passes
    pub max_passes: Option<usize>,
    /// The divisor applied to epsilon between passes (scaled auction)
    pub epsilon_step: f64,
    /// The precision dial used when a problem has none (scaled auction)
    pub default_precision: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            kind: SolverKind::default(),
            zero_tolerance: HungarianSettings::DEFAULT_ZERO_TOLERANCE,
            max_passes: None,
            epsilon_step: ScaledEpsilon::DEFAULT_STEP,
            default_precision: EpsilonPrecision::DEFAULT.value(),
        }
    }
}

/// Limits applied around a solve
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RunConfig {
    /// Give up on a solve that takes longer than this
    #[serde(default, with = "humantime_serde::option")]
    pub time_limit: Option<Duration>,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern
    /// `TAS_<SECTION>__<KEY>` to `<section>.<key>`:
    ///
    /// ```bash
    /// export TAS_SOLVER__KIND="auction-scaled"
    /// export TAS_SOLVER__MAX_PASSES=10000
    /// export TAS_RUN__TIME_LIMIT="2s"
    /// ```
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        config = config.add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        config = config.add_source(
            config::Environment::with_prefix("TAS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}
