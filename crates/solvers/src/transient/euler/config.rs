use thiserror::Error;

/// Configuration for the Euler solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    time_step: f64,
    max_horizon: f64,
}

/// Errors that can occur when validating an Euler solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("time_step must be finite and positive")]
    TimeStep,

    #[error("max_horizon must be finite and positive")]
    MaxHorizon,
}

impl Config {
    /// Creates a new config with a validated time step and horizon.
    ///
    /// `time_step` is the simulated time per step and `max_horizon` the upper
    /// bound on total simulated time, both in the same unit (years).
    ///
    /// # Errors
    ///
    /// Returns an error if either value is non-positive or non-finite.
    pub fn new(time_step: f64, max_horizon: f64) -> Result<Self, ConfigError> {
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(ConfigError::TimeStep);
        }
        if !max_horizon.is_finite() || max_horizon <= 0.0 {
            return Err(ConfigError::MaxHorizon);
        }

        Ok(Self {
            time_step,
            max_horizon,
        })
    }

    /// Returns the simulated time per step.
    #[must_use]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Returns the upper bound on total simulated time.
    #[must_use]
    pub fn max_horizon(&self) -> f64 {
        self.max_horizon
    }

    /// Returns the number of steps simulated against a trajectory of `len`
    /// samples.
    ///
    /// This is `floor(min(max_horizon, time_step * len) / time_step)`. When the
    /// trajectory is the binding limit the result is exactly `len`, with no
    /// round-trip through floating point.
    #[must_use]
    pub fn steps_for(&self, len: usize) -> usize {
        #[allow(clippy::cast_precision_loss)]
        let available = self.time_step * len as f64;
        if self.max_horizon >= available {
            return len;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = (self.max_horizon / self.time_step).floor() as usize;
        steps.min(len)
    }
}
