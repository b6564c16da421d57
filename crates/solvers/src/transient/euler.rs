//! Forward Euler integration of learned rangeland dynamics.
//!
//! This module rolls a biomass/soil-depth state forward with two competing
//! predictors at once and keeps both tracks aligned with a ground-truth
//! trajectory:
//!
//! ```text
//! state_{n+1} = max(state_n + slope(state_n, g_n) * dt, 0)
//! ```
//!
//! Steps flagged as jumps in the ground truth are regime shifts the learned
//! dynamics are not asked to reproduce. At those steps both tracks are reset to
//! the true state and the predictors are not queried.
//!
//! # Example
//!
//! ```ignore
//! use rangeland_solvers::transient::euler::{self, Config, Labeled};
//!
//! let config = Config::new(0.5, 1000.0)?;
//! let solution = euler::simulate_unobserved(
//!     &truth,
//!     Labeled::new("for", &forest),
//!     Labeled::new("nn", &network),
//!     &config,
//! )?;
//!
//! for track in &solution.tracks {
//!     println!("{}: {:?}", track.label, track.biomass.last());
//! }
//! ```

mod action;
mod config;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Track};

use log::debug;
use rangeland_core::{Conditions, Observer, Predictor, State, StepIntegrable, Trajectory};

/// A predictor paired with the label used to name its output.
#[derive(Debug, Clone)]
pub struct Labeled<P> {
    pub label: String,
    pub predictor: P,
}

impl<P> Labeled<P> {
    pub fn new(label: impl Into<String>, predictor: P) -> Self {
        Self {
            label: label.into(),
            predictor,
        }
    }
}

/// Simulates two predictors against a ground-truth trajectory.
///
/// # Algorithm
///
/// 1. Determine the step count `N` from the config and trajectory length,
///    and truncate the ground truth to `N` samples.
/// 2. Start both tracks at the first ground-truth state.
/// 3. For each step `i` in `1..N`:
///    - If the truth flags a jump at `i`, set both states to the truth at `i`.
///    - Otherwise advance each track from its state at `i - 1` using its
///      predictor's slope at grazing `g[i - 1]`, flooring at zero.
///    - Emit an [`Event`] to the observer.
/// 4. Return the solution with the time vector and both tracks.
///
/// Both tracks go through the same update routine, so the jump and clamping
/// rules are identical for each predictor.
///
/// # Observer
///
/// The observer receives an [`Event`] for the initial state and after each
/// step, and may return [`Action::Abort`] to cancel the run.
///
/// # Errors
///
/// - [`Error::EmptyTrajectory`] if `truth` has no samples.
/// - [`Error::Predictor`] if either predictor fails; the failure is not
///   retried.
/// - [`Error::Aborted`] if the observer aborts the run.
pub fn simulate<A, B, Obs>(
    truth: &Trajectory,
    first: Labeled<A>,
    second: Labeled<B>,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    A: Predictor,
    B: Predictor,
    Obs: Observer<Event, Action>,
{
    let initial = truth.first().ok_or(Error::EmptyTrajectory)?.state();

    let steps = config.steps_for(truth.len());
    let dt = config.time_step();
    let truth = truth.truncated(steps);

    debug!(
        "simulating {steps} steps of {dt} ({} jumps) with `{}` and `{}`",
        truth.jump_count(),
        first.label,
        second.label
    );

    let mut tracks = [
        Track::with_capacity(&first.label, steps),
        Track::with_capacity(&second.label, steps),
    ];
    let time = time_vector(steps, dt);

    let mut states = [initial; 2];
    for (step, sample) in truth.samples().iter().enumerate() {
        if step > 0 {
            if sample.jump {
                states = [sample.state(); 2];
            } else {
                let grazing = truth.samples()[step - 1].grazing;
                states = [
                    advance(&first, states[0], grazing, dt, step)?,
                    advance(&second, states[1], grazing, dt, step)?,
                ];
            }
        }

        for (track, state) in tracks.iter_mut().zip(states) {
            track.push(state);
        }

        let event = Event {
            step,
            total_steps: steps,
            time: time[step],
            jumped: step > 0 && sample.jump,
            truth: *sample,
            states,
        };
        if let Some(Action::Abort) = observer.observe(&event) {
            return Err(Error::Aborted { step });
        }
    }

    Ok(Solution {
        time_step: dt,
        time,
        truth,
        tracks,
    })
}

/// Simulates two predictors against a ground-truth trajectory without
/// observation.
///
/// This is a convenience wrapper around [`simulate`] that discards events.
///
/// # Errors
///
/// Returns an error if the trajectory is empty or a predictor fails.
pub fn simulate_unobserved<A, B>(
    truth: &Trajectory,
    first: Labeled<A>,
    second: Labeled<B>,
    config: &Config,
) -> Result<Solution, Error>
where
    A: Predictor,
    B: Predictor,
{
    simulate(truth, first, second, config, ())
}

/// Advances one track by a single explicit Euler step.
fn advance<P: Predictor>(
    labeled: &Labeled<P>,
    previous: State,
    grazing: f64,
    dt: f64,
    step: usize,
) -> Result<State, Error> {
    let slope = labeled
        .predictor
        .predict(&Conditions::new(previous, grazing))
        .map_err(|err| Error::predictor(&labeled.label, step, err))?;

    Ok(previous.step(slope, dt).clamp_non_negative())
}

#[allow(clippy::cast_precision_loss)]
fn time_vector(steps: usize, dt: f64) -> Vec<f64> {
    (0..steps).map(|i| i as f64 * dt).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use rangeland_core::{Sample, Slope};
    use thiserror::Error;

    // --- Test fixtures ---

    /// Predictor with a fixed slope everywhere.
    struct Constant(Slope);

    impl Predictor for Constant {
        type Error = Infallible;

        fn predict(&self, _conditions: &Conditions) -> Result<Slope, Self::Error> {
            Ok(self.0)
        }
    }

    /// Linear dynamics: dB/dt = g - 0.1·B, dD/dt = 0.05·B - 0.2.
    struct Linear;

    impl Predictor for Linear {
        type Error = Infallible;

        fn predict(&self, c: &Conditions) -> Result<Slope, Self::Error> {
            Ok(Slope::new(
                c.grazing - 0.1 * c.state.biomass,
                0.05 * c.state.biomass - 0.2,
            ))
        }
    }

    /// Predictor that records the grazing pressure it was queried with.
    struct Recording(std::cell::RefCell<Vec<Conditions>>);

    impl Predictor for Recording {
        type Error = Infallible;

        fn predict(&self, c: &Conditions) -> Result<Slope, Self::Error> {
            self.0.borrow_mut().push(*c);
            Ok(Slope::default())
        }
    }

    #[derive(Debug, Error)]
    #[error("input shape mismatch")]
    struct ShapeError;

    /// Predictor that fails once the biomass drops below a threshold.
    struct FailsBelow(f64);

    impl Predictor for FailsBelow {
        type Error = ShapeError;

        fn predict(&self, c: &Conditions) -> Result<Slope, Self::Error> {
            if c.state.biomass < self.0 {
                Err(ShapeError)
            } else {
                Ok(Slope::new(-1.0, 0.0))
            }
        }
    }

    fn flat(len: usize, jumps: &[usize]) -> Trajectory {
        (0..len)
            .map(|i| Sample::new(10.0 + i as f64, 5.0, 1.0, jumps.contains(&i)))
            .collect()
    }

    // --- Tests ---

    #[test]
    fn three_sample_scenario_with_jump() {
        let truth = Trajectory::from(vec![
            Sample::new(10.0, 5.0, 1.0, false),
            Sample::new(10.2, 5.0, 1.0, false),
            Sample::new(3.0, 5.0, 1.0, true),
        ]);
        let config = Config::new(1.0, 3.0).unwrap();
        let slope = Slope::new(0.2, -0.1);

        let solution = simulate_unobserved(
            &truth,
            Labeled::new("for", Constant(slope)),
            Labeled::new("nn", Constant(slope)),
            &config,
        )
        .expect("should simulate");

        assert_eq!(solution.steps(), 3);
        assert_eq!(solution.time, vec![0.0, 1.0, 2.0]);

        for track in &solution.tracks {
            assert_eq!(track.state(0), Some(State::new(10.0, 5.0)));

            let step1 = track.state(1).unwrap();
            assert_relative_eq!(step1.biomass, 10.2);
            assert_relative_eq!(step1.soil_depth, 4.9);

            // Forced to the truth regardless of the slope.
            assert_eq!(track.state(2), Some(State::new(3.0, 5.0)));
        }
    }

    #[test]
    fn empty_trajectory_fails() {
        let config = Config::new(0.5, 10.0).unwrap();

        let result = simulate_unobserved(
            &Trajectory::default(),
            Labeled::new("a", Constant(Slope::default())),
            Labeled::new("b", Constant(Slope::default())),
            &config,
        );

        assert!(matches!(result, Err(Error::EmptyTrajectory)));
    }

    #[test]
    fn negative_soil_depth_is_clamped_to_zero() {
        let truth = flat(4, &[]);
        let config = Config::new(1.0, 100.0).unwrap();

        let solution = simulate_unobserved(
            &truth,
            Labeled::new("a", Constant(Slope::new(0.0, -3.0))),
            Labeled::new("b", Constant(Slope::new(-20.0, 0.0))),
            &config,
        )
        .unwrap();

        assert_eq!(solution.tracks[0].soil_depth, vec![5.0, 2.0, 0.0, 0.0]);
        assert_eq!(solution.tracks[1].biomass, vec![10.0, 0.0, 0.0, 0.0]);
        assert!(
            solution.tracks[0]
                .soil_depth
                .iter()
                .all(|d| d.to_bits() != (-0.0_f64).to_bits())
        );
    }

    #[test]
    fn states_are_never_negative() {
        let truth = flat(50, &[7, 30]);
        let config = Config::new(0.5, 1000.0).unwrap();

        let solution = simulate_unobserved(
            &truth,
            Labeled::new("decay", Constant(Slope::new(-1.3, -0.7))),
            Labeled::new("linear", Linear),
            &config,
        )
        .unwrap();

        for track in &solution.tracks {
            assert!(track.biomass.iter().all(|&b| b >= 0.0));
            assert!(track.soil_depth.iter().all(|&d| d >= 0.0));
        }
    }

    #[test]
    fn jump_steps_match_truth_exactly() {
        let jumps = [3, 4, 9];
        let truth = flat(12, &jumps);
        let config = Config::new(0.5, 1000.0).unwrap();

        let solution = simulate_unobserved(
            &truth,
            Labeled::new("up", Constant(Slope::new(5.0, 5.0))),
            Labeled::new("linear", Linear),
            &config,
        )
        .unwrap();

        for &step in &jumps {
            let expected = truth.samples()[step].state();
            for track in &solution.tracks {
                assert_eq!(track.state(step), Some(expected));
            }
        }
    }

    #[test]
    fn non_jump_steps_follow_update_law() {
        let truth = flat(20, &[6]);
        let config = Config::new(0.5, 1000.0).unwrap();
        let dt = config.time_step();

        let solution = simulate_unobserved(
            &truth,
            Labeled::new("linear", Linear),
            Labeled::new("decay", Constant(Slope::new(-0.4, 0.1))),
            &config,
        )
        .unwrap();

        let samples = truth.samples();
        for step in 1..solution.steps() {
            if samples[step].jump {
                continue;
            }
            let grazing = samples[step - 1].grazing;

            let prev = solution.tracks[0].state(step - 1).unwrap();
            let slope = Linear
                .predict(&Conditions::new(prev, grazing))
                .unwrap();
            let expected = prev.step(slope, dt).clamp_non_negative();
            assert_eq!(solution.tracks[0].state(step), Some(expected));

            let prev = solution.tracks[1].state(step - 1).unwrap();
            let expected = State::new(
                (prev.biomass - 0.4 * dt).max(0.0),
                (prev.soil_depth + 0.1 * dt).max(0.0),
            );
            assert_eq!(solution.tracks[1].state(step), Some(expected));
        }
    }

    #[test]
    fn predictors_see_previous_state_and_grazing() {
        let truth = Trajectory::from(vec![
            Sample::new(1.0, 1.0, 0.1, false),
            Sample::new(1.0, 1.0, 0.2, false),
            Sample::new(1.0, 1.0, 0.3, true),
            Sample::new(1.0, 1.0, 0.4, false),
        ]);
        let config = Config::new(1.0, 100.0).unwrap();
        let recording = Recording(std::cell::RefCell::new(Vec::new()));

        simulate_unobserved(
            &truth,
            Labeled::new("rec", &recording),
            Labeled::new("other", Constant(Slope::default())),
            &config,
        )
        .unwrap();

        // Step 2 is a jump, so the predictor is queried only for steps 1 and 3.
        let grazing: Vec<f64> = recording.0.borrow().iter().map(|c| c.grazing).collect();
        assert_eq!(grazing, vec![0.1, 0.3]);
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let truth = flat(40, &[11, 12]);
        let config = Config::new(0.5, 15.0).unwrap();

        let run = || {
            simulate_unobserved(
                &truth,
                Labeled::new("linear", Linear),
                Labeled::new("decay", Constant(Slope::new(-0.3, 0.05))),
                &config,
            )
            .unwrap()
        };

        let a = run();
        let b = run();
        for (ta, tb) in a.tracks.iter().zip(&b.tracks) {
            let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
            assert_eq!(bits(&ta.biomass), bits(&tb.biomass));
            assert_eq!(bits(&ta.soil_depth), bits(&tb.soil_depth));
        }
    }

    #[test]
    fn outputs_are_truncated_to_horizon() {
        let truth = flat(40, &[]);
        let config = Config::new(0.5, 7.3).unwrap();

        let solution = simulate_unobserved(
            &truth,
            Labeled::new("a", Linear),
            Labeled::new("b", Linear),
            &config,
        )
        .unwrap();

        assert_eq!(solution.steps(), 14);
        assert_eq!(solution.truth.len(), 14);
        assert_eq!(solution.tracks[0].len(), 14);
        assert_eq!(solution.tracks[1].len(), 14);
        assert_relative_eq!(solution.time[13], 6.5);
        assert_relative_eq!(solution.horizon(), 7.0);
    }

    #[test]
    fn horizon_below_one_step_yields_empty_solution() {
        let truth = flat(5, &[]);
        let config = Config::new(1.0, 0.5).unwrap();

        let solution = simulate_unobserved(
            &truth,
            Labeled::new("a", Linear),
            Labeled::new("b", Linear),
            &config,
        )
        .unwrap();

        assert_eq!(solution.steps(), 0);
        assert!(solution.tracks.iter().all(Track::is_empty));
    }

    #[test]
    fn predictor_failure_is_propagated_with_label() {
        let truth = flat(10, &[]);
        let config = Config::new(1.0, 100.0).unwrap();

        let result = simulate_unobserved(
            &truth,
            Labeled::new("ok", Linear),
            Labeled::new("fragile", FailsBelow(7.5)),
            &config,
        );

        // Biomass falls 10 → 9 → 8 → 7, and the query from 7 fails at step 4.
        match result {
            Err(Error::Predictor { label, step, .. }) => {
                assert_eq!(label, "fragile");
                assert_eq!(step, 4);
            }
            other => panic!("expected predictor error, got {other:?}"),
        }
    }

    #[test]
    fn observer_sees_every_step_and_jump() {
        let truth = flat(6, &[2]);
        let config = Config::new(0.5, 100.0).unwrap();

        let mut seen = Vec::new();
        simulate(
            &truth,
            Labeled::new("a", Linear),
            Labeled::new("b", Linear),
            &config,
            |event: &Event| {
                seen.push((event.step, event.jumped, event.total_steps));
                None
            },
        )
        .unwrap();

        assert_eq!(
            seen,
            vec![
                (0, false, 6),
                (1, false, 6),
                (2, true, 6),
                (3, false, 6),
                (4, false, 6),
                (5, false, 6),
            ]
        );
    }

    #[test]
    fn observer_can_abort() {
        let truth = flat(10, &[]);
        let config = Config::new(0.5, 100.0).unwrap();

        let result = simulate(
            &truth,
            Labeled::new("a", Linear),
            Labeled::new("b", Linear),
            &config,
            |event: &Event| (event.step == 3).then_some(Action::Abort),
        );

        assert!(matches!(result, Err(Error::Aborted { step: 3 })));
    }
}
