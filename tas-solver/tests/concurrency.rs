use rstest::*;
use rstest_reuse::{self, *};
use std::thread;
use tas_core::{
    models::{CostMatrix, Direction},
    ports::Solver,
};

mod all_solvers;
use all_solvers::all_solvers;

#[fixture]
fn problems() -> Vec<(CostMatrix, Direction)> {
    vec![
        (
            CostMatrix::from_rows(vec![vec![2.0, 8.0], vec![4.0, 6.0], vec![5.0, 1.0]]).unwrap(),
            Direction::Maximize,
        ),
        (
            CostMatrix::from_rows(vec![
                vec![2.0, 4.0, 8.0, 16.0],
                vec![4.0, 10.0, 5.0, 3.0],
                vec![3.0, 5.0, 1.0, 6.0],
            ])
            .unwrap(),
            Direction::Minimize,
        ),
        (
            CostMatrix::from_rows(vec![vec![1.5, -2.0], vec![0.25, 3.0]]).unwrap(),
            Direction::Minimize,
        ),
    ]
}

// One instance shared by many threads gives every caller the answer it would
// get from a private instance.
#[apply(all_solvers)]
#[rstest]
fn shared_solver_across_threads(
    solver: impl Solver + Sync,
    problems: Vec<(CostMatrix, Direction)>,
) {
    let sequential: Vec<_> = problems
        .iter()
        .map(|(costs, direction)| solver.solve(costs, *direction, None).unwrap())
        .collect();

    let concurrent: Vec<Vec<_>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    problems
                        .iter()
                        .rev()
                        .map(|(costs, direction)| solver.solve(costs, *direction, None).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    for mut results in concurrent {
        results.reverse();
        assert_eq!(results, sequential);
    }
}

#[apply(all_solvers)]
#[rstest]
fn caller_matrix_is_untouched(solver: impl Solver) {
    let costs = CostMatrix::from_rows(vec![vec![7.0, 3.0, 1.0], vec![2.0, 9.0, 4.0]]).unwrap();
    let copy = costs.clone();
    for direction in [Direction::Minimize, Direction::Maximize] {
        solver.solve(&costs, direction, None).unwrap();
        assert_eq!(costs, copy);
    }
}
