use log::info;
use rangeland_core::Observer;

use crate::traits::HasStep;

/// An observer that logs run completion at fixed fractional checkpoints.
///
/// With a `frequency` of `0.1` and a 200-step run, a line is logged every
/// `ceil(200 * 0.1) = 20` steps:
///
/// ```text
/// scenario_0: 10% of steps completed...
/// ```
///
/// A non-positive or non-finite frequency disables logging. The observer never
/// returns an action, so it can be attached to any solver whose events
/// implement [`HasStep`].
#[derive(Debug, Clone)]
pub struct Progress {
    name: String,
    frequency: f64,
}

impl Progress {
    /// Creates a progress logger labeled with `name`.
    pub fn new(name: impl Into<String>, frequency: f64) -> Self {
        Self {
            name: name.into(),
            frequency,
        }
    }

    /// Returns the checkpoint interval for a run of `total_steps`, or `None`
    /// if progress logging is disabled.
    ///
    /// The interval is `ceil(total_steps * frequency)`, and at least one step.
    #[must_use]
    pub fn interval(&self, total_steps: usize) -> Option<usize> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 || total_steps == 0 {
            return None;
        }

        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let interval = (total_steps as f64 * self.frequency).ceil() as usize;
        Some(interval.max(1))
    }

    /// Returns `true` if `step` is a checkpoint in a run of `total_steps`.
    #[must_use]
    pub fn is_checkpoint(&self, step: usize, total_steps: usize) -> bool {
        step > 0
            && self
                .interval(total_steps)
                .is_some_and(|interval| step % interval == 0)
    }
}

impl<E: HasStep, A> Observer<E, A> for Progress {
    fn observe(&mut self, event: &E) -> Option<A> {
        let (step, total) = (event.step(), event.total_steps());
        if self.is_checkpoint(step, total) {
            #[allow(clippy::cast_precision_loss)]
            let percent = 100.0 * step as f64 / total as f64;
            info!("{}: {percent:.0}% of steps completed...", self.name);
        }
        None
    }
}
