use rangeland_core::Trajectory;
use thiserror::Error;

use crate::Error;

/// Jump annotations were absent, so no jumps were assumed.
///
/// This is recovered rather than fatal: the trajectory is still usable, with
/// every jump flag set to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no jump annotations for `{scenario}`; assuming no jumps")]
pub struct MissingJumpData {
    pub scenario: String,
}

/// A loaded trajectory and any data-quality warning raised while loading it.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub trajectory: Trajectory,
    pub missing_jumps: Option<MissingJumpData>,
}

/// Loads a scenario's ground-truth trajectory.
pub trait TrajectorySource {
    /// Loads the block-reduced, fixed-cadence trajectory of `scenario`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario's data cannot be read or is malformed.
    /// Missing jump annotations are not an error; see [`Loaded::missing_jumps`].
    fn load(&self, scenario: &str) -> Result<Loaded, Error>;
}
