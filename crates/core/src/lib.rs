//! Core traits and types for simulating grazed rangeland transitions.
//!
//! This crate defines the shared abstractions that the integrator, observers,
//! predictors, and data loaders build on:
//!
//! - [`State`], [`Slope`], [`Conditions`] — the biomass/soil-depth state, its
//!   time derivative, and the full predictor input including grazing pressure
//! - [`Sample`], [`Trajectory`] — a fixed-cadence ground-truth record
//! - [`Predictor`] — a derivative estimator mapping conditions to a slope
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`StepIntegrable`] — types that can be stepped by `derivative * delta`

mod observer;
mod predictor;
mod state;
mod step;
mod trajectory;

pub use observer::Observer;
pub use predictor::{FromFn, Predictor, from_fn};
pub use state::{Conditions, Slope, State};
pub use step::{DerivativeOf, StepIntegrable};
pub use trajectory::{Sample, Trajectory};
