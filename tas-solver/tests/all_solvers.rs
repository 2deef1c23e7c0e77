#![allow(unused_macros)]
use rstest_reuse::template;

// These create testing "templates" to allow for the injection of each solver
// implementation. The exact solvers must reproduce an optimal matching on
// integer costs; every solver must land within one unit of the optimum.

#[template]
#[rstest]
#[case::hungarian(tas_solver::hungarian::HungarianSolver::default())]
#[case::auction_fixed(tas_solver::auction::FixedEpsilonSolver::default())]
#[case::auction_scaled(
    tas_solver::auction::ScaledEpsilonSolver::new(tas_solver::auction::AuctionSettings {
        epsilon: tas_solver::auction::ScaledEpsilon::default()
            .with_default_precision(tas_core::models::EpsilonPrecision::MAX),
        max_passes: None,
    })
)]
pub fn all_solvers(#[case] solver: impl Solver) -> () {}

#[template]
#[rstest]
#[case::hungarian(tas_solver::hungarian::HungarianSolver::default())]
#[case::auction_fixed(tas_solver::auction::FixedEpsilonSolver::default())]
pub fn exact_solvers(#[case] solver: impl Solver) -> () {}
