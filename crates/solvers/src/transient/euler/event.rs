use rangeland_core::{Sample, State};

/// Event emitted by the Euler solver for each step.
///
/// Step 0 is the initial state before any integration.
/// Steps 1..N-1 are emitted after each integration step.
#[derive(Debug, Clone, Copy)]
pub struct Event {
    /// The step index (0 for initial).
    pub step: usize,

    /// Total number of steps in this run, including the initial state.
    pub total_steps: usize,

    /// Simulated time at this step.
    pub time: f64,

    /// Whether the ground truth flagged a jump at this step, in which case
    /// both states were reset to the truth instead of integrated.
    pub jumped: bool,

    /// The ground-truth sample at this step.
    pub truth: Sample,

    /// The simulated state of each predictor's track.
    pub states: [State; 2],
}
