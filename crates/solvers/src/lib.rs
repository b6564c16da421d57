//! Numerical machinery for learned rangeland dynamics.
//!
//! - [`transient`] — integrators that roll a state forward using predicted
//!   slopes, checked against a ground-truth trajectory
//! - [`compare`] — agreement metrics between simulated and true series

pub mod compare;
pub mod transient;
