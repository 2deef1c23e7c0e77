#![warn(missing_docs)]
//! Solvers for the rectangular assignment problem.
//!
//! Every engine implements [`tas_core::ports::Solver`]:
//!
//! - [`hungarian::HungarianSolver`]: an exact primal-dual solver, O(n³).
//! - [`auction::FixedEpsilonSolver`]: a bidding auction with a constant epsilon
//!   of `1 / (n + 1)`, exact for integer costs.
//! - [`auction::ScaledEpsilonSolver`]: a bidding auction that anneals epsilon
//!   from coarse to fine according to an [`EpsilonPrecision`](tas_core::models::EpsilonPrecision) dial.
//!
//! All of them first pad the input to a square matrix (see [`square`]) and trim
//! the raw square result back to the caller's shape.

/**
 * These are implementations of the assignment solvers.
 */
mod impls;
pub use impls::*;

/// Padding of rectangular cost matrices to square ones, and the inverse trim.
pub mod square;

/// JSON problem and report types, and the instrumented solve wrapper.
#[cfg(feature = "io")]
pub mod io;
