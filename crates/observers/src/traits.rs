//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasStep`] — events that report a position within a run of known length
//!
//! # Action traits
//!
//! - [`CanAbort`] — actions that can cancel a run
//!
//! # Example
//!
//! ```rust
//! use rangeland_core::Observer;
//! use rangeland_observers::traits::{CanAbort, HasStep};
//!
//! struct StepBudget {
//!     max_steps: usize,
//! }
//!
//! impl<E: HasStep, A: CanAbort> Observer<E, A> for StepBudget {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.step() >= self.max_steps).then(A::abort)
//!     }
//! }
//! ```

use rangeland_solvers::transient::euler;

/// An event that reports its position within a run.
pub trait HasStep {
    /// Returns the zero-based step index of this event.
    fn step(&self) -> usize;

    /// Returns the total number of steps in the run.
    fn total_steps(&self) -> usize;
}

/// An action type that can cancel a run.
pub trait CanAbort {
    /// Returns the action that aborts the run.
    fn abort() -> Self;
}

// --- HasStep for euler::Event ---

impl HasStep for euler::Event {
    fn step(&self) -> usize {
        self.step
    }

    fn total_steps(&self) -> usize {
        self.total_steps
    }
}

// --- CanAbort impls ---

impl CanAbort for euler::Action {
    fn abort() -> Self {
        Self::Abort
    }
}
