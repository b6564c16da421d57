#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Conditions, State};

/// One fixed-cadence observation of the ground-truth system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    pub biomass: f64,
    pub soil_depth: f64,
    pub grazing: f64,

    /// Whether the system underwent an externally forced regime shift at this
    /// sample.
    pub jump: bool,
}

impl Sample {
    #[must_use]
    pub fn new(biomass: f64, soil_depth: f64, grazing: f64, jump: bool) -> Self {
        Self {
            biomass,
            soil_depth,
            grazing,
            jump,
        }
    }

    /// Returns the `(B, D)` state of this sample.
    #[must_use]
    pub fn state(&self) -> State {
        State::new(self.biomass, self.soil_depth)
    }

    /// Returns the sample's state together with its grazing pressure.
    #[must_use]
    pub fn conditions(&self) -> Conditions {
        Conditions::new(self.state(), self.grazing)
    }
}

/// An ordered, fixed-cadence ground-truth record.
///
/// Samples are time-increasing with a uniform step. A trajectory is immutable
/// once built; [`Trajectory::truncated`] returns a new, shorter trajectory.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    #[must_use]
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Returns a trajectory holding at most the first `len` samples.
    #[must_use]
    pub fn truncated(&self, len: usize) -> Self {
        let len = len.min(self.samples.len());
        Self::new(self.samples[..len].to_vec())
    }

    /// Returns the number of samples flagged as jumps.
    #[must_use]
    pub fn jump_count(&self) -> usize {
        self.samples.iter().filter(|s| s.jump).count()
    }

    #[must_use]
    pub fn biomass(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.biomass).collect()
    }

    #[must_use]
    pub fn soil_depth(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.soil_depth).collect()
    }

    #[must_use]
    pub fn grazing(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.grazing).collect()
    }

    #[must_use]
    pub fn jumps(&self) -> Vec<bool> {
        self.samples.iter().map(|s| s.jump).collect()
    }
}

impl From<Vec<Sample>> for Trajectory {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<Sample> for Trajectory {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
