use rangeland_core::{State, Trajectory};

/// A simulated biomass/soil-depth series driven by one predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// The predictor's label, used to name output columns.
    pub label: String,
    pub biomass: Vec<f64>,
    pub soil_depth: Vec<f64>,
}

impl Track {
    pub(crate) fn with_capacity(label: &str, capacity: usize) -> Self {
        Self {
            label: label.to_owned(),
            biomass: Vec::with_capacity(capacity),
            soil_depth: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, state: State) {
        self.biomass.push(state.biomass);
        self.soil_depth.push(state.soil_depth);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.biomass.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.biomass.is_empty()
    }

    /// Returns the simulated state at `step`, if present.
    #[must_use]
    pub fn state(&self, step: usize) -> Option<State> {
        Some(State::new(
            *self.biomass.get(step)?,
            *self.soil_depth.get(step)?,
        ))
    }
}

/// The result of an Euler run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Simulated time per step.
    pub time_step: f64,

    /// Uniformly spaced times `0, dt, .., (N-1)·dt`.
    pub time: Vec<f64>,

    /// Ground truth truncated to the simulated steps.
    pub truth: Trajectory,

    /// One track per predictor, in the order the predictors were given.
    pub tracks: [Track; 2],
}

impl Solution {
    /// Number of simulated steps (N), including the initial state.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.time.len()
    }

    /// Total simulated time span, `N · time_step`.
    #[must_use]
    pub fn horizon(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let steps = self.steps() as f64;
        steps * self.time_step
    }
}
