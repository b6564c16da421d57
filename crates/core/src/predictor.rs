use std::{error::Error as StdError, marker::PhantomData};

use crate::{Conditions, Slope};

/// A derivative estimator for rangeland dynamics.
///
/// A predictor maps the current [`Conditions`] (biomass, soil depth, grazing
/// pressure) to the instantaneous rate of change of biomass and soil depth.
///
/// Predictors must be pure functions of their input for a given loaded model.
/// Ensembles may aggregate internally (for example by taking a median), but
/// repeated calls with the same input must return the same slope, which keeps
/// the integrator deterministic.
pub trait Predictor {
    type Error: StdError + Send + Sync + 'static;

    /// Estimates `(dB/dt, dD/dt)` at the given conditions.
    ///
    /// # Errors
    ///
    /// Each predictor defines its own `Error` type, typically for input shape
    /// or model-loading defects.
    fn predict(&self, conditions: &Conditions) -> Result<Slope, Self::Error>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    type Error = P::Error;

    fn predict(&self, conditions: &Conditions) -> Result<Slope, Self::Error> {
        (**self).predict(conditions)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    type Error = P::Error;

    fn predict(&self, conditions: &Conditions) -> Result<Slope, Self::Error> {
        (**self).predict(conditions)
    }
}

/// A [`Predictor`] backed by a closure.
///
/// Construct with [`from_fn`].
pub struct FromFn<F, E> {
    func: F,
    _error: PhantomData<fn() -> E>,
}

/// Wraps a closure as a [`Predictor`].
///
/// # Example
///
/// ```
/// use std::convert::Infallible;
/// use rangeland_core::{Conditions, Predictor, Slope, State, from_fn};
///
/// let decay = from_fn(|c: &Conditions| {
///     Ok::<_, Infallible>(Slope::new(-0.1 * c.state.biomass, 0.0))
/// });
///
/// let slope = decay.predict(&Conditions::new(State::new(10.0, 1.0), 0.0)).unwrap();
/// assert_eq!(slope, Slope::new(-1.0, 0.0));
/// ```
pub fn from_fn<F, E>(func: F) -> FromFn<F, E>
where
    F: Fn(&Conditions) -> Result<Slope, E>,
    E: StdError + Send + Sync + 'static,
{
    FromFn {
        func,
        _error: PhantomData,
    }
}

impl<F, E> Predictor for FromFn<F, E>
where
    F: Fn(&Conditions) -> Result<Slope, E>,
    E: StdError + Send + Sync + 'static,
{
    type Error = E;

    fn predict(&self, conditions: &Conditions) -> Result<Slope, Self::Error> {
        (self.func)(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use thiserror::Error;

    use crate::State;

    #[derive(Debug, Error)]
    #[error("bad input")]
    struct BadInput;

    struct Constant(Slope);

    impl Predictor for Constant {
        type Error = Infallible;

        fn predict(&self, _conditions: &Conditions) -> Result<Slope, Self::Error> {
            Ok(self.0)
        }
    }

    #[test]
    fn references_and_boxes_delegate() {
        let constant = Constant(Slope::new(1.0, 2.0));
        let conditions = Conditions::default();

        assert_eq!((&constant).predict(&conditions).unwrap(), Slope::new(1.0, 2.0));

        let boxed: Box<dyn Predictor<Error = Infallible>> = Box::new(constant);
        assert_eq!(boxed.predict(&conditions).unwrap(), Slope::new(1.0, 2.0));
    }

    #[test]
    fn closure_predictor_sees_conditions() {
        let predictor = from_fn(|c: &Conditions| {
            Ok::<_, Infallible>(Slope::new(c.grazing, c.state.soil_depth))
        });

        let slope = predictor
            .predict(&Conditions::new(State::new(0.0, 4.0), 2.5))
            .unwrap();

        assert_eq!(slope, Slope::new(2.5, 4.0));
    }

    #[test]
    fn closure_predictor_propagates_errors() {
        let predictor = from_fn(|_: &Conditions| Err::<Slope, _>(BadInput));

        assert!(predictor.predict(&Conditions::default()).is_err());
    }
}
