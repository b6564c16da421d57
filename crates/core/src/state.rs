#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::StepIntegrable;

/// The simulated state of a rangeland cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State {
    /// Standing biomass (B).
    pub biomass: f64,

    /// Soil depth (D).
    pub soil_depth: f64,
}

impl State {
    /// Creates a state from biomass and soil depth.
    #[must_use]
    pub fn new(biomass: f64, soil_depth: f64) -> Self {
        Self {
            biomass,
            soil_depth,
        }
    }

    /// Returns the state with each component floored at zero.
    ///
    /// Biomass and soil depth are physical quantities and cannot go negative.
    /// A `NaN` component is floored to zero as well.
    #[must_use]
    pub fn clamp_non_negative(self) -> Self {
        Self {
            biomass: self.biomass.max(0.0),
            soil_depth: self.soil_depth.max(0.0),
        }
    }

    /// Returns `true` if both components are zero or greater.
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        self.biomass >= 0.0 && self.soil_depth >= 0.0
    }
}

/// Rate of change of a [`State`] per unit time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slope {
    /// dB/dt.
    pub biomass: f64,

    /// dD/dt.
    pub soil_depth: f64,
}

impl Slope {
    #[must_use]
    pub fn new(biomass: f64, soil_depth: f64) -> Self {
        Self {
            biomass,
            soil_depth,
        }
    }
}

impl From<[f64; 2]> for Slope {
    fn from([biomass, soil_depth]: [f64; 2]) -> Self {
        Self::new(biomass, soil_depth)
    }
}

impl StepIntegrable<f64> for State {
    type Derivative = Slope;

    fn step(&self, derivative: Slope, delta: f64) -> Self {
        Self {
            biomass: self.biomass + derivative.biomass * delta,
            soil_depth: self.soil_depth + derivative.soil_depth * delta,
        }
    }
}

/// Everything a predictor is given: the current state and grazing pressure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Conditions {
    pub state: State,

    /// Grazing pressure (g).
    pub grazing: f64,
}

impl Conditions {
    #[must_use]
    pub fn new(state: State, grazing: f64) -> Self {
        Self { state, grazing }
    }

    /// Returns the feature vector `[B, D, g]` in model input order.
    #[must_use]
    pub fn features(&self) -> [f64; 3] {
        [self.state.biomass, self.state.soil_depth, self.grazing]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn step_applies_slope_times_delta() {
        let state = State::new(10.0, 5.0);
        let next = state.step(Slope::new(0.2, -0.1), 0.5);

        assert_relative_eq!(next.biomass, 10.1);
        assert_relative_eq!(next.soil_depth, 4.95);
    }

    #[test]
    fn clamp_floors_negative_components_at_zero() {
        let state = State::new(-0.3, 2.0).clamp_non_negative();
        assert_eq!(state, State::new(0.0, 2.0));
        assert!(state.is_non_negative());

        let state = State::new(1.0, f64::NAN).clamp_non_negative();
        assert_eq!(state, State::new(1.0, 0.0));
    }

    #[test]
    fn clamp_leaves_positive_state_untouched() {
        let state = State::new(3.0, 0.0);
        assert_eq!(state.clamp_non_negative(), state);
    }

    #[test]
    fn features_are_in_model_order() {
        let conditions = Conditions::new(State::new(1.0, 2.0), 3.0);
        assert_eq!(conditions.features(), [1.0, 2.0, 3.0]);
    }
}
