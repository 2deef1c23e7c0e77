use clap::Parser as _;
use rstest::*;
use std::{ffi::OsStr, path::PathBuf, time::Duration};
use tas_core::models::Assignment;
use tas_solver::io::{Problem, Report};
use tasolve::{AppConfig, BaseArgs, CliError, Commands, Score, SolverConfig, SolverKind};

#[fixture]
fn problem() -> Problem {
    serde_json::from_str(r#"{ "costs": [[2, 8], [4, 6], [5, 1]], "maximize": true }"#).unwrap()
}

// A path in the system temp directory that is unique to this test
fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tasolve-{}-{name}", std::process::id()))
}

#[test]
fn parse_solve() {
    let args = BaseArgs::try_parse_from([
        "tasolve", "solve", "problem.json", "--solver", "auction-scaled", "-p", "0.9", "-t", "250ms",
    ])
    .unwrap();

    match args.command {
        Commands::Solve {
            solver,
            precision,
            time_limit,
            ..
        } => {
            assert_eq!(solver, Some(SolverKind::AuctionScaled));
            assert_eq!(precision, Some(0.9));
            assert_eq!(time_limit, Some(Duration::from_millis(250)));
        }
        _ => panic!("expected the solve command"),
    }
}

#[test]
fn parse_score() {
    let args = BaseArgs::try_parse_from(["tasolve", "score", "-", "--assignment", "1,-1,0"]).unwrap();
    match args.command {
        Commands::Score { assignment, .. } => assert_eq!(assignment, vec![1, -1, 0]),
        _ => panic!("expected the score command"),
    }

    assert!(BaseArgs::try_parse_from(["tasolve", "solve", "in.json", "--solver", "simplex"]).is_err());
}

#[rstest]
#[case::hungarian(SolverKind::Hungarian)]
#[case::auction_fixed(SolverKind::AuctionFixed)]
#[case::auction_scaled(SolverKind::AuctionScaled)]
fn every_kind_solves(problem: Problem, #[case] kind: SolverKind) {
    let report = kind.solve(&SolverConfig::default(), &problem).unwrap();
    assert_eq!(report.solver, kind.label());
    assert_eq!(report.assigned, 2);
    assert!(report.total_cost >= 12.0);
}

#[rstest]
#[tokio::test]
async fn solve_within_limit(problem: Problem) {
    let report = SolverKind::Hungarian
        .solve_within(SolverConfig::default(), problem, Some(Duration::from_secs(60)))
        .await
        .unwrap();
    assert_eq!(report.assignment.to_signed(), vec![1, -1, 0]);
    assert_eq!(report.total_cost, 13.0);
}

#[tokio::test]
async fn solve_exceeding_limit_fails() {
    let n = 400;
    let problem = Problem {
        costs: (0..n)
            .map(|i| (0..n).map(|j| ((i * 37 + j * 91) % 1000) as f64).collect())
            .collect(),
        maximize: false,
        epsilon_precision: Some(1.0),
    };

    let limit = Duration::from_nanos(1);
    let error = SolverKind::AuctionScaled
        .solve_within(SolverConfig::default(), problem, Some(limit))
        .await
        .unwrap_err();

    assert!(matches!(
        error.downcast_ref::<CliError>(),
        Some(CliError::TimeLimit(elapsed)) if *elapsed == limit
    ));
}

#[rstest]
fn invalid_tunables_are_rejected(problem: Problem) {
    let config = SolverConfig {
        epsilon_step: 0.5,
        ..Default::default()
    };
    assert!(SolverKind::AuctionScaled.solve(&config, &problem).is_err());

    let config = SolverConfig {
        default_precision: 2.0,
        ..Default::default()
    };
    assert!(SolverKind::AuctionScaled.solve(&config, &problem).is_err());

    for zero_tolerance in [0.0, -1.0, f64::NAN] {
        let config = SolverConfig {
            zero_tolerance,
            ..Default::default()
        };
        let error = SolverKind::Hungarian.solve(&config, &problem).unwrap_err();
        assert!(error.to_string().contains("zero tolerance"));
    }
}

#[rstest]
fn pass_limit_is_reported(problem: Problem) {
    let config = SolverConfig {
        max_passes: Some(0),
        ..Default::default()
    };
    let error = SolverKind::AuctionFixed.solve(&config, &problem).unwrap_err();
    assert!(error.to_string().contains("did not converge"));
}

#[rstest]
fn score_assignment(problem: Problem) {
    let valid = Score::evaluate(&problem, Assignment::try_from(vec![1, -1, 0]).unwrap()).unwrap();
    assert_eq!(
        valid,
        Score {
            valid: true,
            total_cost: Some(13.0),
            assigned: 2
        }
    );

    let reused = Score::evaluate(&problem, Assignment::try_from(vec![0, 0, -1]).unwrap()).unwrap();
    assert!(!reused.valid);
    assert_eq!(reused.total_cost, None);
}

#[test]
fn config_layers() {
    let defaults = AppConfig::load(None).unwrap();
    assert_eq!(defaults.solver.kind, SolverKind::Hungarian);
    assert_eq!(defaults.solver.epsilon_step, 5.0);
    assert_eq!(defaults.solver.default_precision, 0.5);
    assert_eq!(defaults.run.time_limit, None);

    let path = scratch("config.toml");
    std::fs::write(
        &path,
        "[solver]\nkind = \"auction-fixed\"\nmax_passes = 100\n\n[run]\ntime_limit = \"3s\"\n",
    )
    .unwrap();
    let loaded = AppConfig::load(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.solver.kind, SolverKind::AuctionFixed);
    assert_eq!(loaded.solver.max_passes, Some(100));
    assert_eq!(loaded.solver.zero_tolerance, 1e-9);
    assert_eq!(loaded.run.time_limit, Some(Duration::from_secs(3)));

    assert!(AppConfig::load(Some(&scratch("missing.toml"))).is_err());
}

#[tokio::test]
async fn evaluate_writes_report() {
    let input = scratch("problem.json");
    let output = scratch("report.json");
    std::fs::write(&input, r#"{ "costs": [[2, 4, 8, 16], [4, 10, 5, 3], [3, 5, 1, 6]] }"#).unwrap();

    let args = BaseArgs::try_parse_from([
        OsStr::new("tasolve"),
        OsStr::new("solve"),
        input.as_os_str(),
        OsStr::new("--output"),
        output.as_os_str(),
    ])
    .unwrap();
    args.evaluate().await.unwrap();

    let report: Report = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    std::fs::remove_file(&input).unwrap();
    std::fs::remove_file(&output).unwrap();

    assert_eq!(report.solver, "hungarian");
    assert_eq!(report.assignment.to_signed(), vec![0, 3, 2]);
    assert_eq!(report.total_cost, 6.0);
}
