#![warn(missing_docs)]
//! Core types for the taxi assignment engines.
//!
//! The crate is split in the same way as the rest of the workspace: plain,
//! validated data types live in [`models`], and the contract every assignment
//! engine fulfils lives in [`ports`]. Nothing here performs any I/O.

/// Validated input and output types for assignment problems.
///
/// A [`models::CostMatrix`] can only be constructed from finite values with at
/// least one row and one column, and a [`models::EpsilonPrecision`] can only
/// hold a value in `[0, 1]`. Anything that reaches a solver is therefore
/// already well-formed, and the solvers never need to re-check their input.
pub mod models;

/// Interface traits implemented by the assignment engines.
pub mod ports;
