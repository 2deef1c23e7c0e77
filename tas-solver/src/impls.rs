/// Implementation of the exact primal-dual (Kuhn-Munkres) solver
pub mod hungarian;

/// Implementation of the bidding auction solvers and their epsilon schedules
pub mod auction;
