//! Solvers for transient problems, stepping a state forward in time.
//!
//! # Solvers
//!
//! - [`euler`] — explicit first-order integration of two competing
//!   predictors against a ground-truth trajectory

pub mod euler;
